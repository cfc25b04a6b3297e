//! User response DTOs

use serde::Serialize;

use crate::models::{Role, User};

/// Public view of an account (never includes the password hash)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub role: Role,
    pub credits: u32,
    pub disabled: bool,
    pub failed_attempts: u32,
}

impl UserResponse {
    pub fn new(username: impl Into<String>, user: &User) -> Self {
        Self {
            username: username.into(),
            role: user.role,
            credits: user.credits,
            disabled: user.disabled,
            failed_attempts: user.failed_attempts,
        }
    }
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

/// Credit balance response
#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    pub username: String,
    pub credits: u32,
}

/// Account status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub username: String,
    pub disabled: bool,
}

/// Reservation count response
#[derive(Debug, Serialize)]
pub struct ReservationCountResponse {
    pub username: String,
    pub count: usize,
    pub upcoming: usize,
}

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
