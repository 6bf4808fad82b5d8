//! Claim expiry.
//!
//! A claim is *active* while `expires_at > now`. Every validation path and
//! every read view calls [`Liveness::of`] with the instant its operation
//! sampled, so an expired claim is void everywhere the moment its deadline
//! passes, whether or not the sweeper has run.
//!
//! The [`ExpirySweeper`] is optional housekeeping: it physically resets
//! stale claims, and it does so only while holding the exclusion gate.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use seatlock_core::traits::Clock;
use seatlock_core::types::{ClaimToken, SeatStatus, SeatView};

use crate::exclusion::ExclusionGate;
use crate::table::{SeatRecord, SeatState};

/// Expiry-adjusted state of a seat at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness<'a> {
    /// Never claimed, released, or reset.
    Available,
    /// Claimed and still within its deadline.
    Active {
        /// Owning token.
        token: &'a ClaimToken,
        /// Claim deadline.
        expires_at: DateTime<Utc>,
    },
    /// Still physically claimed, but the deadline has passed.
    Expired {
        /// Token of the void claim.
        token: &'a ClaimToken,
    },
    /// Confirmed.
    Confirmed,
}

impl<'a> Liveness<'a> {
    /// Evaluates `record` against `now`.
    pub fn of(record: &'a SeatRecord, now: DateTime<Utc>) -> Self {
        match &record.state {
            SeatState::Available => Self::Available,
            SeatState::Confirmed => Self::Confirmed,
            SeatState::Claimed { token, expires_at } if *expires_at > now => Self::Active {
                token,
                expires_at: *expires_at,
            },
            SeatState::Claimed { token, .. } => Self::Expired { token },
        }
    }

    /// Returns `true` if a new claim may take the seat.
    pub fn is_claimable(&self) -> bool {
        matches!(self, Self::Available | Self::Expired { .. })
    }
}

/// Builds the externally visible view of `record` at `now`.
///
/// Expired claims are reported as available with no deadline.
pub fn effective_view(record: &SeatRecord, now: DateTime<Utc>) -> SeatView {
    let (status, claim_expires_at) = match Liveness::of(record, now) {
        Liveness::Available | Liveness::Expired { .. } => (SeatStatus::Available, None),
        Liveness::Active { expires_at, .. } => (SeatStatus::Claimed, Some(expires_at)),
        Liveness::Confirmed => (SeatStatus::Confirmed, None),
    };

    SeatView {
        id: record.id.clone(),
        status,
        claim_expires_at,
    }
}

/// Periodically resets expired claims under the exclusion gate.
#[derive(Clone)]
pub struct ExpirySweeper {
    /// Gate guarding the seat table.
    gate: Arc<ExclusionGate>,
    /// Time source shared with the reservation service.
    clock: Arc<dyn Clock>,
    /// Delay between sweeps.
    interval: Duration,
}

impl std::fmt::Debug for ExpirySweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirySweeper")
            .field("interval", &self.interval)
            .finish()
    }
}

impl ExpirySweeper {
    /// Creates a sweeper.
    pub fn new(gate: Arc<ExclusionGate>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            gate,
            clock,
            interval,
        }
    }

    /// Runs one sweep cycle, returning the number of seats reset.
    pub async fn sweep_once(&self) -> usize {
        let mut guard = self.gate.acquire().await;
        let now = self.clock.now();

        let expired: Vec<_> = guard
            .table()
            .list()
            .filter(|record| matches!(Liveness::of(record, now), Liveness::Expired { .. }))
            .map(|record| record.id)
            .collect();

        for id in &expired {
            guard.reset(id);
            debug!(seat_id = %id, "Expired claim reset by sweeper");
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "Expiry sweep completed");
        }

        expired.len()
    }

    /// Sweeps on every interval tick until `shutdown` turns `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Expiry sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.sweep_once().await;
                }
            }
        }

        info!("Expiry sweeper stopped");
    }
}
