//! Reservation request DTOs

use serde::Deserialize;
use validator::Validate;

/// Booking request; the owner is always the authenticated user
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub field: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub date: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub time: String,
}

/// Date filter
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Cancellation options
#[derive(Debug, Default, Deserialize)]
pub struct CancelQuery {
    #[serde(default)]
    pub confirm_forfeit: bool,
}
