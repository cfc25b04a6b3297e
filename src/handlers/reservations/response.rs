//! Reservation response DTOs

use serde::Serialize;

use crate::models::Reservation;

/// Created reservation and the balance left afterwards
#[derive(Debug, Serialize)]
pub struct CreateReservationResponse {
    pub reservation: Reservation,
    pub credits: u32,
}

/// Cancelled reservation
#[derive(Debug, Serialize)]
pub struct CancelReservationResponse {
    pub deleted: Reservation,
    pub refunded: bool,
    pub credits: u32,
}

/// Archive sweep result
#[derive(Debug, Serialize)]
pub struct ResetPastResponse {
    pub moved_count: usize,
}
