//! Response DTOs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seatlock_core::types::SeatId;
use seatlock_engine::{ReleaseDetail, SeatFailure};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Successful lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedResponse {
    /// Always `true`.
    pub success: bool,
    /// Token covering every claimed seat.
    pub token: String,
    /// Shared claim deadline.
    pub expires_at: DateTime<Utc>,
    /// Claimed seats.
    pub seat_ids: Vec<SeatId>,
}

/// Successful confirm.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmed seats.
    pub confirmed_resources: Vec<SeatId>,
}

/// Rejected lock or confirm; nothing was changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedResponse {
    /// Always `false`.
    pub success: bool,
    /// Every failing seat and why.
    pub failed_resources: Vec<SeatFailure>,
}

impl RejectedResponse {
    /// Wraps the failures of a rejected request.
    pub fn new(failed_resources: Vec<SeatFailure>) -> Self {
        Self {
            success: false,
            failed_resources,
        }
    }
}

impl IntoResponse for RejectedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CONFLICT, Json(self)).into_response()
    }
}

/// Release result; always a success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResponse {
    /// Always `true`.
    pub success: bool,
    /// One outcome per distinct requested seat.
    pub details: Vec<ReleaseDetail>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}
