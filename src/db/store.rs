//! Transactional access to the document

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    db::{Database, Persistence},
    error::AppResult,
};

/// Owner of the in-memory document.
///
/// Every mutation runs on a draft copy under the store lock. The draft is
/// persisted first and only then replaces the live document, so a failed
/// closure or a failed save leaves both memory and disk unchanged, and two
/// writers can never interleave.
pub struct Store {
    document: Mutex<Database>,
    persistence: Arc<dyn Persistence>,
}

impl Store {
    /// Load the stored document, or start from defaults
    pub async fn open(persistence: Arc<dyn Persistence>) -> AppResult<Self> {
        let document = match persistence.load().await? {
            Some(document) => document,
            None => {
                tracing::info!("No stored document found, starting with defaults");
                Database::default()
            }
        };

        tracing::info!(
            users = document.users.len(),
            reservations = document.reservations().len(),
            archived = document.past_reservations().len(),
            "Document loaded"
        );

        Ok(Self {
            document: Mutex::new(document),
            persistence,
        })
    }

    /// Run a read-only view over the current document
    pub async fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let document = self.document.lock().await;
        f(&document)
    }

    /// Apply `f` to a draft, persist it, then commit it
    pub async fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Database) -> AppResult<R>,
    ) -> AppResult<R> {
        let mut document = self.document.lock().await;

        let mut draft = document.clone();
        let output = f(&mut draft)?;

        self.persistence.save(&draft).await?;
        *document = draft;

        Ok(output)
    }
}
