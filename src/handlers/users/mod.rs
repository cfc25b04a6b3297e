//! User management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

/// User routes (all require authentication)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_users))
        .route("/{username}", get(handler::get_user).put(handler::upsert_user))
        .route(
            "/{username}/credits",
            get(handler::get_credits).patch(handler::update_credits),
        )
        .route("/{username}/status", patch(handler::update_status))
        .route("/{username}/password", patch(handler::change_password))
        .route(
            "/{username}/reservations/count",
            get(handler::count_reservations),
        )
}
