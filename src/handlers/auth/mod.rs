//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Routes reachable without a token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", post(handler::login))
}

/// Routes that need a valid token
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/logout", post(handler::logout))
}
