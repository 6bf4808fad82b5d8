//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lock request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LockRequest {
    /// Seats to claim together.
    #[serde(alias = "resourceIds")]
    #[validate(length(min = 1, message = "seatIds must not be empty"))]
    pub seat_ids: Vec<String>,
    /// Claim lifetime in whole seconds; the configured default if omitted.
    #[validate(range(min = 1, message = "ttlSeconds must be positive"))]
    pub ttl_seconds: Option<u64>,
}

/// Confirm request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// Token returned by the lock request.
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    /// Seats to confirm.
    #[serde(alias = "resourceIds")]
    #[validate(length(min = 1, message = "seatIds must not be empty"))]
    pub seat_ids: Vec<String>,
}

/// Release request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequest {
    /// Token returned by the lock request.
    #[validate(length(min = 1, message = "token is required"))]
    pub token: String,
    /// Seats to release.
    #[serde(alias = "resourceIds")]
    #[validate(length(min = 1, message = "seatIds must not be empty"))]
    pub seat_ids: Vec<String>,
}
