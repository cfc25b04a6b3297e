//! Admin service
//!
//! Booking limits, the field registry, the notes board and image slots.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{BookingLimits, Field, ImageSlots, dedup_fields},
    utils::validation::strip_control_chars,
};

/// Admin service for managed content
pub struct AdminService;

impl AdminService {
    pub async fn get_config(store: &Store) -> BookingLimits {
        store.read(|db| db.admin.config).await
    }

    /// Replace the booking limits
    pub async fn update_config(store: &Store, limits: BookingLimits) -> AppResult<BookingLimits> {
        store
            .transaction(|db| {
                db.admin.config = limits;
                Ok(())
            })
            .await?;

        tracing::info!(
            max_bookings_per_user = limits.max_bookings_per_user,
            "Booking limits updated"
        );
        Ok(limits)
    }

    pub async fn get_fields(store: &Store) -> Vec<Field> {
        store.read(|db| db.admin.fields.clone()).await
    }

    /// Replace the field registry.
    ///
    /// Entries without a string `id` and `name` are skipped, both parts are
    /// trimmed and the first entry wins when ids repeat.
    pub async fn replace_fields(store: &Store, entries: Vec<Value>) -> AppResult<Vec<Field>> {
        let fields = dedup_fields(entries.iter().filter_map(parse_field).collect());
        let dropped = entries.len() - fields.len();

        let saved = fields.clone();
        store
            .transaction(|db| {
                db.admin.fields = saved;
                Ok(())
            })
            .await?;

        tracing::info!(count = fields.len(), dropped, "Field registry replaced");
        Ok(fields)
    }

    pub async fn get_notes(store: &Store) -> String {
        store.read(|db| db.admin.notes.clone()).await
    }

    /// Replace the notes text; `None` clears it
    pub async fn update_notes(store: &Store, text: Option<&str>) -> AppResult<String> {
        let notes = text.map(strip_control_chars).unwrap_or_default();

        let saved = notes.clone();
        store
            .transaction(|db| {
                db.admin.notes = saved;
                Ok(())
            })
            .await?;

        tracing::info!(length = notes.len(), "Notes updated");
        Ok(notes)
    }

    pub async fn get_images(store: &Store) -> ImageSlots {
        store.read(|db| db.admin.images.clone()).await
    }

    /// Merge image attributes into the stored slots
    pub async fn update_images(
        store: &Store,
        updates: BTreeMap<String, String>,
    ) -> AppResult<ImageSlots> {
        let unknown: Vec<&str> = updates
            .keys()
            .map(String::as_str)
            .filter(|key| !ImageSlots::is_known_key(key))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Unknown image keys: {}",
                unknown.join(", ")
            )));
        }

        let changed = updates.len();
        let images = store
            .transaction(|db| {
                db.admin.images.merge(updates);
                Ok(db.admin.images.clone())
            })
            .await?;

        tracing::info!(changed, "Image slots updated");
        Ok(images)
    }
}

fn parse_field(entry: &Value) -> Option<Field> {
    let id = entry.get("id")?.as_str()?;
    let name = entry.get("name")?.as_str()?;
    Field::normalized(id, name)
}
