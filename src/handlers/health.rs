//! Health check handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::{db::repositories::UserRepository, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: usize,
    pub reservations: usize,
}

/// Liveness probe
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { ok: true })
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (users, reservations) = state
        .store()
        .read(|db| (UserRepository::count(db), db.reservations().len()))
        .await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users,
        reservations,
    })
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
}
