//! Structured results of the reservation operations.
//!
//! Per-seat rejections are ordinary values. A rejected lock or confirm is
//! still `Ok(..)` at the service boundary; only malformed requests are
//! errors.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seatlock_core::types::{ClaimToken, SeatId};

/// Why a seat failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// No seat with this id exists.
    NotFound,
    /// The seat is already confirmed.
    AlreadyConfirmed,
    /// The seat is held by an unexpired claim.
    ActivelyClaimed,
    /// The seat is not under a claim.
    NotClaimed,
    /// The seat is claimed under a different token.
    TokenMismatch,
    /// The claim for this token has passed its deadline.
    ClaimExpired,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyConfirmed => "ALREADY_CONFIRMED",
            Self::ActivelyClaimed => "ACTIVELY_CLAIMED",
            Self::NotClaimed => "NOT_CLAIMED",
            Self::TokenMismatch => "TOKEN_MISMATCH",
            Self::ClaimExpired => "CLAIM_EXPIRED",
        };
        f.write_str(s)
    }
}

/// A seat that failed validation and the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatFailure {
    /// Requested seat id.
    pub id: SeatId,
    /// Failure reason.
    pub reason: FailureReason,
}

impl SeatFailure {
    /// Creates a failure entry.
    pub fn new(id: SeatId, reason: FailureReason) -> Self {
        Self { id, reason }
    }
}

/// Result of a lock request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// Every requested seat is now claimed under `token`.
    Locked {
        /// Fresh token covering all requested seats.
        token: ClaimToken,
        /// Shared deadline of every claimed seat.
        expires_at: DateTime<Utc>,
        /// Claimed seats, in request order.
        seats: Vec<SeatId>,
    },
    /// Nothing was changed; every failing seat is listed.
    Rejected {
        /// Failing seats with reasons.
        failures: Vec<SeatFailure>,
    },
}

/// Result of a confirm request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Every requested seat is now confirmed.
    Confirmed {
        /// Confirmed seats, in request order.
        seats: Vec<SeatId>,
    },
    /// Nothing was changed; every failing seat is listed.
    Rejected {
        /// Failing seats with reasons.
        failures: Vec<SeatFailure>,
    },
}

/// Per-seat result of a release request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseOutcome {
    /// The claim was dropped and the seat is available again.
    Released,
    /// No seat with this id exists.
    NotFound,
    /// The seat was not under an active claim.
    NotClaimed,
    /// The seat is claimed under a different token; left unchanged.
    TokenMismatch,
}

/// Release result for one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDetail {
    /// Requested seat id.
    pub id: SeatId,
    /// What happened to it.
    pub outcome: ReleaseOutcome,
}

/// Result of a release request, one entry per distinct requested seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseReport {
    /// Per-seat outcomes, in request order.
    pub details: Vec<ReleaseDetail>,
}

impl ReleaseReport {
    /// Number of seats actually released.
    pub fn released(&self) -> usize {
        self.details
            .iter()
            .filter(|d| d.outcome == ReleaseOutcome::Released)
            .count()
    }
}
