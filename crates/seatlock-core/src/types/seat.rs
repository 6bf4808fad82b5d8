//! Seat model: status, read-only views, and the fixed layout.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::id::SeatId;

/// Largest number of rows a grid layout can label (`A`..=`Z`).
pub const MAX_ROWS: u32 = 26;

/// Reservation status of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Free to be claimed.
    Available,
    /// Held under a token until its deadline.
    Claimed,
    /// Permanently booked.
    Confirmed,
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Claimed => write!(f, "claimed"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Read-only snapshot of a seat as observed at a point in time.
///
/// Claims whose deadline has passed are already reported as
/// [`SeatStatus::Available`] with no deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    /// Seat identifier.
    pub id: SeatId,
    /// Effective status.
    pub status: SeatStatus,
    /// Claim deadline, present only while actively claimed.
    pub claim_expires_at: Option<DateTime<Utc>>,
}

/// Seat counts by effective status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    /// Total number of seats.
    pub total: usize,
    /// Seats free to claim (including expired claims).
    pub available: usize,
    /// Seats under an active claim.
    pub claimed: usize,
    /// Confirmed seats.
    pub confirmed: usize,
}

impl SeatSummary {
    /// Counts a single seat view.
    pub fn record(&mut self, status: SeatStatus) {
        self.total += 1;
        match status {
            SeatStatus::Available => self.available += 1,
            SeatStatus::Claimed => self.claimed += 1,
            SeatStatus::Confirmed => self.confirmed += 1,
        }
    }
}

/// Ordered, duplicate-free list of seat ids fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLayout {
    ids: Vec<SeatId>,
}

impl SeatLayout {
    /// Builds a row-major grid: rows `A`.., seats numbered from 1.
    pub fn grid(rows: u32, seats_per_row: u32) -> Result<Self, AppError> {
        if rows == 0 || rows > MAX_ROWS || seats_per_row == 0 {
            return Err(AppError::configuration(format!(
                "invalid grid {rows}x{seats_per_row}"
            )));
        }

        let mut ids = Vec::with_capacity((rows * seats_per_row) as usize);
        for row in 0..rows {
            let label = char::from(b'A' + row as u8);
            for seat in 1..=seats_per_row {
                ids.push(SeatId::new(format!("{label}{seat}"))?);
            }
        }
        Ok(Self { ids })
    }

    /// Seat ids in layout order.
    pub fn ids(&self) -> &[SeatId] {
        &self.ids
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the layout has no seats.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
