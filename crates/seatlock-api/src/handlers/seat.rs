//! Seat handlers: lock, confirm, release, and read-only queries.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use seatlock_core::types::{SeatSummary, SeatView};
use seatlock_engine::{ConfirmOutcome, LockOutcome};

use crate::dto::request::{ConfirmRequest, LockRequest, ReleaseRequest};
use crate::dto::response::{
    ApiResponse, ConfirmedResponse, LockedResponse, RejectedResponse, ReleaseResponse,
};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/seats/lock
pub async fn lock_seats(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LockRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .reservations
        .lock(req.seat_ids.as_slice(), req.ttl_seconds)
        .await?;

    Ok(match outcome {
        LockOutcome::Locked {
            token,
            expires_at,
            seats,
        } => Json(LockedResponse {
            success: true,
            token: token.into_string(),
            expires_at,
            seat_ids: seats,
        })
        .into_response(),
        LockOutcome::Rejected { failures } => RejectedResponse::new(failures).into_response(),
    })
}

/// POST /api/seats/confirm
pub async fn confirm_seats(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ConfirmRequest>,
) -> Result<Response, ApiError> {
    let outcome = state
        .reservations
        .confirm(&req.token, req.seat_ids.as_slice())
        .await?;

    Ok(match outcome {
        ConfirmOutcome::Confirmed { seats } => Json(ConfirmedResponse {
            success: true,
            confirmed_resources: seats,
        })
        .into_response(),
        ConfirmOutcome::Rejected { failures } => RejectedResponse::new(failures).into_response(),
    })
}

/// POST /api/seats/release
pub async fn release_seats(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReleaseRequest>,
) -> Result<Json<ReleaseResponse>, ApiError> {
    let report = state
        .reservations
        .release(&req.token, req.seat_ids.as_slice())
        .await?;

    Ok(Json(ReleaseResponse {
        success: true,
        details: report.details,
    }))
}

/// GET /api/seats
pub async fn list_seats(State(state): State<AppState>) -> Json<ApiResponse<Vec<SeatView>>> {
    Json(ApiResponse::ok(state.reservations.list().collect()))
}

/// GET /api/seats/summary
pub async fn seat_summary(State(state): State<AppState>) -> Json<ApiResponse<SeatSummary>> {
    Json(ApiResponse::ok(state.reservations.summary()))
}

/// GET /api/seats/{id}
pub async fn get_seat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SeatView>>, ApiError> {
    let seat = state.reservations.get(&id)?;
    Ok(Json(ApiResponse::ok(seat)))
}
