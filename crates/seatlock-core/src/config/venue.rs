//! Venue (seat layout) configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::seat::{MAX_ROWS, SeatLayout};

/// Fixed seat grid loaded at startup.
///
/// Rows are labelled `A`, `B`, `C`, ... and seats are numbered from 1,
/// so the default 3x5 grid yields `A1..C5`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Number of rows (1..=26).
    #[serde(default = "default_rows")]
    pub rows: u32,
    /// Number of seats in every row.
    #[serde(default = "default_seats_per_row")]
    pub seats_per_row: u32,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seats_per_row: default_seats_per_row(),
        }
    }
}

impl VenueConfig {
    /// Validates the grid dimensions.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rows == 0 || self.rows > MAX_ROWS {
            return Err(AppError::configuration(format!(
                "venue.rows must be between 1 and {MAX_ROWS}, got {}",
                self.rows
            )));
        }
        if self.seats_per_row == 0 {
            return Err(AppError::configuration(
                "venue.seats_per_row must be at least 1",
            ));
        }
        Ok(())
    }

    /// Builds the seat layout described by this configuration.
    pub fn layout(&self) -> Result<SeatLayout, AppError> {
        self.validate()?;
        SeatLayout::grid(self.rows, self.seats_per_row)
    }
}

fn default_rows() -> u32 {
    3
}

fn default_seats_per_row() -> u32 {
    5
}
