//! User handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::extract::AppJson,
    middleware::auth::AuthenticatedUser,
    services::{UserService, user_service::UserUpsert},
    state::AppState,
};

use super::{
    request::{ChangePasswordRequest, UpdateCreditsRequest, UpdateStatusRequest, UpsertUserRequest},
    response::{
        CreditsResponse, MessageResponse, ReservationCountResponse, StatusResponse,
        UserResponse, UsersListResponse,
    },
};

/// List all users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_admin()?;

    let users: Vec<UserResponse> = UserService::list_users(state.store())
        .await
        .iter()
        .map(|(name, user)| UserResponse::new(name.as_str(), user))
        .collect();

    Ok(Json(UsersListResponse {
        total: users.len(),
        users,
    }))
}

/// Get one user (self or admin)
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_self_or_admin(&username)?;

    let user = UserService::get_user(state.store(), &username).await?;
    Ok(Json(UserResponse::new(username, &user)))
}

/// Create or replace a user (admin)
pub async fn upsert_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
    AppJson(payload): AppJson<UpsertUserRequest>,
) -> AppResult<Json<UserResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let user = UserService::upsert_user(
        state.store(),
        &username,
        UserUpsert {
            password: payload.password,
            role: payload.role,
            credits: payload.credits,
            disabled: payload.disabled,
        },
    )
    .await?;

    Ok(Json(UserResponse::new(username, &user)))
}

/// Get credit balance (self or admin)
pub async fn get_credits(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<CreditsResponse>> {
    auth_user.require_self_or_admin(&username)?;

    let credits = UserService::get_credits(state.store(), &username).await?;
    Ok(Json(CreditsResponse { username, credits }))
}

/// Set or adjust credits (admin)
pub async fn update_credits(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
    AppJson(payload): AppJson<UpdateCreditsRequest>,
) -> AppResult<Json<CreditsResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let change = payload
        .change()
        .ok_or_else(|| AppError::Validation("Provide exactly one of 'set' or 'delta'".into()))?;
    let credits = UserService::update_credits(state.store(), &username, change).await?;

    Ok(Json(CreditsResponse { username, credits }))
}

/// Enable or disable an account (admin)
pub async fn update_status(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<StatusResponse>> {
    auth_user.require_admin()?;

    let disabled = UserService::set_status(state.store(), &username, payload.disabled).await?;
    Ok(Json(StatusResponse { username, disabled }))
}

/// Change a password (self or admin)
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
    AppJson(payload): AppJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    auth_user.require_self_or_admin(&username)?;
    payload.validate()?;

    UserService::change_password(
        state.store(),
        auth_user.is_admin(),
        &username,
        payload.current_password.as_deref(),
        &payload.new_password,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}

/// Count a user's active reservations (self or admin)
pub async fn count_reservations(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(username): Path<String>,
) -> AppResult<Json<ReservationCountResponse>> {
    auth_user.require_self_or_admin(&username)?;

    let counts =
        UserService::count_reservations(state.store(), &username, state.clock().today()).await?;

    Ok(Json(ReservationCountResponse {
        username,
        count: counts.total,
        upcoming: counts.upcoming,
    }))
}
