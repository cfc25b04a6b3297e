//! Admin request DTOs

use serde::Deserialize;
use serde_json::Value;

/// Booking limits update
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    #[serde(default)]
    pub max_bookings_per_user: Value,
}

impl UpdateConfigRequest {
    /// The new limit when it is a non-negative integer
    pub fn limit(&self) -> Option<u32> {
        self.max_bookings_per_user
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
    }
}

/// Field registry replacement; entries are checked individually
#[derive(Debug, Deserialize)]
pub struct UpdateFieldsRequest {
    #[serde(default)]
    pub fields: Value,
}

/// Notes update; a missing text clears the notes
#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub text: Option<String>,
}
