//! Admin response DTOs

use serde::Serialize;

use crate::models::Field;

/// Booking limits
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub max_bookings_per_user: u32,
}

/// Field registry
#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub fields: Vec<Field>,
}

/// Notes board
#[derive(Debug, Serialize)]
pub struct NotesResponse {
    pub text: String,
}
