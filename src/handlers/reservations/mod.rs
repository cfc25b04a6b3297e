//! Reservation handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_reservations))
}

/// Routes that need a valid token
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_reservation))
        .route("/{id}", delete(handler::cancel_reservation))
        .route("/reset-past", post(handler::reset_past))
        .route("/past", get(handler::list_past))
}
