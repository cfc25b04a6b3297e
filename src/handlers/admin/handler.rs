//! Admin content handler implementations

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    handlers::extract::AppJson,
    middleware::auth::AuthenticatedUser,
    models::{BookingLimits, ImageSlots},
    services::AdminService,
    state::AppState,
};

use super::{
    request::{UpdateConfigRequest, UpdateFieldsRequest, UpdateNotesRequest},
    response::{ConfigResponse, FieldsResponse, NotesResponse},
};

/// Current booking limits
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let limits = AdminService::get_config(state.store()).await;
    Json(ConfigResponse {
        max_bookings_per_user: limits.max_bookings_per_user,
    })
}

/// Replace booking limits (admin)
pub async fn update_config(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateConfigRequest>,
) -> AppResult<Json<ConfigResponse>> {
    auth_user.require_admin()?;

    let max_bookings_per_user = payload.limit().ok_or_else(|| {
        AppError::InvalidInput("maxBookingsPerUser must be a non-negative integer".to_string())
    })?;

    let limits = AdminService::update_config(
        state.store(),
        BookingLimits {
            max_bookings_per_user,
        },
    )
    .await?;

    Ok(Json(ConfigResponse {
        max_bookings_per_user: limits.max_bookings_per_user,
    }))
}

/// Field registry
pub async fn get_fields(State(state): State<AppState>) -> Json<FieldsResponse> {
    Json(FieldsResponse {
        fields: AdminService::get_fields(state.store()).await,
    })
}

/// Replace the field registry (admin)
pub async fn update_fields(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateFieldsRequest>,
) -> AppResult<Json<FieldsResponse>> {
    auth_user.require_admin()?;

    let Value::Array(entries) = payload.fields else {
        return Err(AppError::InvalidInput("fields must be an array".to_string()));
    };

    let fields = AdminService::replace_fields(state.store(), entries).await?;
    Ok(Json(FieldsResponse { fields }))
}

/// Notes board
pub async fn get_notes(State(state): State<AppState>) -> Json<NotesResponse> {
    Json(NotesResponse {
        text: AdminService::get_notes(state.store()).await,
    })
}

/// Replace the notes (admin)
pub async fn update_notes(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateNotesRequest>,
) -> AppResult<Json<NotesResponse>> {
    auth_user.require_admin()?;

    let text = AdminService::update_notes(state.store(), payload.text.as_deref()).await?;
    Ok(Json(NotesResponse { text }))
}

/// Image slots
pub async fn get_images(State(state): State<AppState>) -> Json<ImageSlots> {
    Json(AdminService::get_images(state.store()).await)
}

/// Merge image attributes (admin)
pub async fn update_images(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<BTreeMap<String, String>>,
) -> AppResult<Json<ImageSlots>> {
    auth_user.require_admin()?;

    let images = AdminService::update_images(state.store(), payload).await?;
    Ok(Json(images))
}
