//! The persisted JSON document

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{AdminSettings, Reservation, ReservationId, SlotKey, User};

/// All application state, persisted as one JSON document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default)]
    pub users: BTreeMap<String, User>,
    #[serde(default)]
    pub(crate) reservations: Vec<Reservation>,
    #[serde(default)]
    pub(crate) past_reservations: Vec<Reservation>,
    #[serde(default)]
    pub admin: AdminSettings,
    /// Unique index over active reservations
    #[serde(skip)]
    pub(crate) slot_index: HashMap<SlotKey, ReservationId>,
}

impl Database {
    /// Parse a document, filling defaults for missing sections
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let mut document: Database = serde_json::from_slice(bytes)?;
        document.normalize();
        Ok(document)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// Restore derived state after deserialization
    pub fn normalize(&mut self) {
        self.admin.images.ensure_complete();
        self.rebuild_slot_index();
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn past_reservations(&self) -> &[Reservation] {
        &self.past_reservations
    }

    pub(crate) fn rebuild_slot_index(&mut self) {
        self.slot_index.clear();
        for reservation in &self.reservations {
            let key = reservation.slot_key();
            if let Some(existing) = self.slot_index.get(&key) {
                tracing::warn!(
                    field = %key.field,
                    date = %key.date,
                    time = %key.time,
                    kept = %existing,
                    duplicate = %reservation.id,
                    "Duplicate booking for one slot found in document"
                );
                continue;
            }
            self.slot_index.insert(key, reservation.id);
        }
    }
}
