//! Document persistence backends

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{db::Database, error::AppResult};

/// Loads and saves the whole document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Persistence: Send + Sync {
    /// `None` when nothing has been stored yet
    async fn load(&self) -> AppResult<Option<Database>>;

    async fn save(&self, document: &Database) -> AppResult<()>;
}

/// JSON file on disk, replaced atomically on every save
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Move an unreadable document out of the way so a fresh one can be written
    async fn quarantine(&self) -> AppResult<PathBuf> {
        let target = self.sibling(&format!(".corrupt-{}", Utc::now().format("%Y%m%d%H%M%S")));
        tokio::fs::rename(&self.path, &target).await?;
        Ok(target)
    }
}

#[async_trait]
impl Persistence for JsonFilePersistence {
    async fn load(&self) -> AppResult<Option<Database>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match Database::from_json(&bytes) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                let moved_to = self.quarantine().await?;
                tracing::error!(
                    path = %self.path.display(),
                    moved_to = %moved_to.display(),
                    error = %e,
                    "Document is not valid JSON, starting from an empty one"
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, document: &Database) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = document.to_json()?;
        let tmp = self.sibling(".tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Document saved");
        Ok(())
    }
}

/// In-process storage, used by tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    document: Mutex<Option<Database>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Database) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }

    /// Last saved document
    pub async fn snapshot(&self) -> Option<Database> {
        self.document.lock().await.clone()
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn load(&self) -> AppResult<Option<Database>> {
        Ok(self.document.lock().await.clone().map(|mut document| {
            document.normalize();
            document
        }))
    }

    async fn save(&self, document: &Database) -> AppResult<()> {
        *self.document.lock().await = Some(document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("db.json"));

        assert!(persistence.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path().join("nested").join("db.json"));

        let mut document = Database::default();
        document
            .users
            .insert("ospite1".into(), User::new("hash".into(), Role::User));
        persistence.save(&document).await.unwrap();

        let loaded = persistence.load().await.unwrap().unwrap();
        assert!(loaded.users.contains_key("ospite1"));
        assert!(!dir.path().join("nested").join("db.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_quarantined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let persistence = JsonFilePersistence::new(&path);
        assert!(persistence.load().await.unwrap().is_none());
        assert!(!path.exists());

        let mut entries = std::fs::read_dir(dir.path()).unwrap();
        let moved = entries.next().unwrap().unwrap().file_name();
        assert!(moved.to_string_lossy().starts_with("db.json.corrupt-"));
    }
}
