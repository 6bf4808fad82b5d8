//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use seatlock_core::config::AppConfig;
use seatlock_engine::ReservationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The single reservation service owning the seat table.
    pub reservations: Arc<ReservationService>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state from its parts.
    pub fn new(config: Arc<AppConfig>, reservations: Arc<ReservationService>) -> Self {
        Self {
            config,
            reservations,
            started_at: Instant::now(),
        }
    }
}
