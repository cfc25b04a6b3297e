//! Admin content handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

/// Read-only routes, open to everyone
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(handler::get_config))
        .route("/fields", get(handler::get_fields))
        .route("/notes", get(handler::get_notes))
        .route("/images", get(handler::get_images))
}

/// Write routes (admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/config", put(handler::update_config))
        .route("/fields", put(handler::update_fields))
        .route("/notes", put(handler::update_notes))
        .route("/images", put(handler::update_images))
}
