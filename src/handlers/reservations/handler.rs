//! Reservation handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::extract::{AppJson, AppQuery},
    middleware::auth::AuthenticatedUser,
    models::{Reservation, ReservationId},
    services::{BookingService, booking_service::BookingRequest},
    state::AppState,
    utils::parse_date,
};

use super::{
    request::{CancelQuery, CreateReservationRequest, DateQuery},
    response::{CancelReservationResponse, CreateReservationResponse, ResetPastResponse},
};

/// Active reservations for one date
pub async fn list_reservations(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let raw = query
        .date
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'date' is required".to_string()))?;
    let date = parse_date(&raw).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok(Json(BookingService::list_for_date(state.store(), date).await))
}

/// Book a slot for the authenticated user
pub async fn create_reservation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<CreateReservationResponse>)> {
    payload.validate()?;

    let receipt = BookingService::create(
        state.store(),
        state.clock(),
        &auth_user.username,
        BookingRequest {
            field: payload.field,
            date: payload.date,
            time: payload.time,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            reservation: receipt.reservation,
            credits: receipt.credits,
        }),
    ))
}

/// Cancel a reservation (owner or admin)
pub async fn cancel_reservation(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<String>,
    AppQuery(query): AppQuery<CancelQuery>,
) -> AppResult<Json<CancelReservationResponse>> {
    let Ok(id) = id.parse::<ReservationId>();

    let cancellation = BookingService::cancel(
        state.store(),
        state.clock(),
        &auth_user.username,
        &id,
        query.confirm_forfeit,
    )
    .await?;

    Ok(Json(CancelReservationResponse {
        deleted: cancellation.reservation,
        refunded: cancellation.refunded,
        credits: cancellation.credits,
    }))
}

/// Archive past reservations (admin)
pub async fn reset_past(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ResetPastResponse>> {
    auth_user.require_admin()?;

    let moved_count = BookingService::reset_past(state.store(), state.clock().today()).await?;
    Ok(Json(ResetPastResponse { moved_count }))
}

/// Archived reservations, optionally for one date (admin)
pub async fn list_past(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    AppQuery(query): AppQuery<DateQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    auth_user.require_admin()?;

    let date = query
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok(Json(BookingService::list_archive(state.store(), date).await))
}
