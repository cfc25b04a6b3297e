//! Authentication handler implementations

use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::extract::AppJson,
    handlers::users::UserResponse,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::LoginRequest,
    response::{AuthResponse, LogoutResponse},
};

/// Login with username and password
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let login = AuthService::login(
        state.store(),
        state.config(),
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        access_token: login.access_token,
        token_type: "Bearer".to_string(),
        expires_in: login.expires_in,
        user: UserResponse::new(login.username, &login.user),
    }))
}

/// Logout (invalidate the presented token)
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<LogoutResponse>> {
    AuthService::logout(state.revoked_tokens(), auth_user.token_id, auth_user.expires_at);
    tracing::info!(username = %auth_user.username, "User logged out");

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
