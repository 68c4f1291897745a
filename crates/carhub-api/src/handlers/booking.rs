//! Booking handlers: reserve, summary, lookup, confirm, cancel.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use carhub_booking::{BookingOutcome, BookingSummary};
use carhub_core::error::AppError;

use crate::dto::request::CreateBookingRequest;
use crate::dto::response::{ApiResponse, CreateBookingResponse, HoldResponse};
use crate::error::ApiError;
use crate::extractors::parse_token;
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "Booking not found or expired";

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.reservations.create_booking(req.into()).await?;

    let status = match &outcome {
        BookingOutcome::Reserved(_) => StatusCode::OK,
        BookingOutcome::Unavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BookingOutcome::Conflict { .. } => StatusCode::CONFLICT,
    };

    Ok((status, Json(CreateBookingResponse::from(&outcome))))
}

/// GET /api/bookings/{token}/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<BookingSummary>>, ApiError> {
    let token = parse_token(&token)?;

    let summary = state
        .summaries
        .get_summary(token)
        .await
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/bookings/{token}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<HoldResponse>>, ApiError> {
    let token = parse_token(&token)?;

    let hold = state
        .reservations
        .get_booking(token)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    Ok(Json(ApiResponse::ok(hold.into())))
}

/// POST /api/bookings/{token}/confirm
pub async fn confirm_booking(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<HoldResponse>>, ApiError> {
    let token = parse_token(&token)?;

    let hold = state
        .reservations
        .confirm_booking(token)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND_MESSAGE))?;

    Ok(Json(ApiResponse::ok(hold.into())))
}

/// DELETE /api/bookings/{token}
pub async fn remove_booking(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    let token = parse_token(&token)?;
    state.reservations.remove_booking(token).await?;
    Ok(StatusCode::NO_CONTENT)
}
