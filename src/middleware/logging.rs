//! Access log
//!
//! One event per request. The acting user is read from the response
//! extensions, where the auth middleware leaves it, so bookings and
//! cancellations can be traced back to an account.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::middleware::auth::AuthenticatedUser;

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    // `date` and `confirm_forfeit` travel in the query string
    let query = request.uri().query().unwrap_or_default().to_string();

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let status = response.status();
    let (user, role) = response
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| (u.username.clone(), u.role.as_str()))
        .unwrap_or_else(|| ("-".to_string(), "-"));

    match Severity::of(&method, status) {
        Severity::Error => tracing::error!(
            %method, %path, %query, %user, role, status = status.as_u16(), elapsed_ms,
            "Request failed"
        ),
        Severity::Denied => tracing::warn!(
            %method, %path, %query, %user, role, status = status.as_u16(), elapsed_ms,
            "Request denied"
        ),
        Severity::Change => tracing::info!(
            %method, %path, %query, %user, role, status = status.as_u16(), elapsed_ms,
            "State changed"
        ),
        Severity::Read => tracing::debug!(
            %method, %path, %query, %user, role, status = status.as_u16(), elapsed_ms,
            "Request served"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Severity {
    Error,
    /// Failed logins, missing tokens and role checks
    Denied,
    Change,
    Read,
}

impl Severity {
    fn of(method: &Method, status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Error
        } else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            Self::Denied
        } else if status.is_success() && *method != Method::GET && *method != Method::HEAD {
            Self::Change
        } else {
            Self::Read
        }
    }
}
