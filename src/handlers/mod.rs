//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod extract;
pub mod health;
pub mod reservations;
pub mod users;

use axum::{Router, middleware};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let require_auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .merge(health::routes())
        .merge(auth::public_routes())
        .merge(auth::protected_routes().route_layer(require_auth.clone()))
        .nest("/users", users::routes().route_layer(require_auth.clone()))
        .nest(
            "/reservations",
            reservations::public_routes()
                .merge(reservations::protected_routes().route_layer(require_auth.clone())),
        )
        .nest(
            "/admin",
            admin::public_routes().merge(admin::protected_routes().route_layer(require_auth)),
        )
}
