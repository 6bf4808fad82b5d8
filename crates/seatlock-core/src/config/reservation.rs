//! Reservation limits and expiry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bound accepted for `max_ttl_seconds` (one year).
pub const TTL_CEILING_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Limits applied to lock/confirm/release requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// TTL applied when a lock request does not specify one.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// Largest TTL a caller may request.
    #[serde(default = "default_max_ttl")]
    pub max_ttl_seconds: u64,
    /// Maximum number of distinct seats in a single lock request.
    #[serde(default = "default_max_seats")]
    pub max_seats_per_request: usize,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: default_ttl(),
            max_ttl_seconds: default_max_ttl(),
            max_seats_per_request: default_max_seats(),
        }
    }
}

impl ReservationConfig {
    /// Validates the limits against each other.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_ttl_seconds == 0 || self.max_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "reservation TTLs must be positive",
            ));
        }
        if self.max_ttl_seconds > TTL_CEILING_SECONDS {
            return Err(AppError::configuration(format!(
                "reservation.max_ttl_seconds ({}) exceeds the ceiling of {} seconds",
                self.max_ttl_seconds, TTL_CEILING_SECONDS
            )));
        }
        if self.default_ttl_seconds > self.max_ttl_seconds {
            return Err(AppError::configuration(format!(
                "reservation.default_ttl_seconds ({}) exceeds max_ttl_seconds ({})",
                self.default_ttl_seconds, self.max_ttl_seconds
            )));
        }
        if self.max_seats_per_request == 0 {
            return Err(AppError::configuration(
                "reservation.max_seats_per_request must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Background expiry sweeper configuration.
///
/// Lazy expiry is always applied on every read and validation; the
/// sweeper only reclaims stale claims physically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Sweep interval in seconds (`0` disables the sweeper).
    #[serde(default)]
    pub sweep_interval_seconds: u64,
}

impl ExpiryConfig {
    /// Returns the sweep interval, or `None` when the sweeper is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_seconds > 0).then(|| Duration::from_secs(self.sweep_interval_seconds))
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_max_ttl() -> u64 {
    3600
}

fn default_max_seats() -> usize {
    10
}
