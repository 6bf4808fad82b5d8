//! Reservation service: lock, confirm, and release.
//!
//! Each operation acquires the exclusion gate, samples the clock once,
//! validates every requested seat against that instant, and only then
//! mutates. Lock and confirm are all-or-nothing; release is per seat.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use seatlock_core::config::ReservationConfig;
use seatlock_core::error::AppError;
use seatlock_core::result::AppResult;
use seatlock_core::traits::{Clock, SystemClock};
use seatlock_core::types::{ClaimToken, SeatId, SeatLayout, SeatSummary, SeatView};

use crate::exclusion::ExclusionGate;
use crate::expiry::{ExpirySweeper, Liveness, effective_view};
use crate::outcome::{
    ConfirmOutcome, FailureReason, LockOutcome, ReleaseDetail, ReleaseOutcome, ReleaseReport,
    SeatFailure,
};
use crate::table::SeatTable;
use crate::token::TokenGenerator;

/// Orchestrates every state transition of the seat table.
#[derive(Clone)]
pub struct ReservationService {
    /// Seat table, read without the gate.
    table: Arc<SeatTable>,
    /// Gate owning write access to the table.
    gate: Arc<ExclusionGate>,
    /// Time source.
    clock: Arc<dyn Clock>,
    /// Token generator.
    tokens: TokenGenerator,
    /// Request limits.
    config: ReservationConfig,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService")
            .field("seats", &self.table.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ReservationService {
    /// Creates a service over `layout` using the wall clock.
    pub fn new(layout: &SeatLayout, config: ReservationConfig) -> Self {
        Self::with_clock(layout, config, Arc::new(SystemClock))
    }

    /// Creates a service over `layout` with an explicit clock.
    pub fn with_clock(
        layout: &SeatLayout,
        config: ReservationConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let table = Arc::new(SeatTable::new(layout));
        let gate = Arc::new(ExclusionGate::new(Arc::clone(&table)));

        info!(seats = table.len(), "Seat table initialized");

        Self {
            table,
            gate,
            clock,
            tokens: TokenGenerator::new(),
            config,
        }
    }

    /// Request limits in effect.
    pub fn config(&self) -> &ReservationConfig {
        &self.config
    }

    /// Builds a sweeper sharing this service's gate and clock.
    pub fn sweeper(&self, interval: Duration) -> ExpirySweeper {
        ExpirySweeper::new(Arc::clone(&self.gate), Arc::clone(&self.clock), interval)
    }

    /// Claims every seat in `seat_ids` under one fresh token, or none.
    ///
    /// `ttl_seconds` falls back to the configured default when `None`.
    pub async fn lock<S: AsRef<str>>(
        &self,
        seat_ids: &[S],
        ttl_seconds: Option<u64>,
    ) -> AppResult<LockOutcome> {
        let ids = normalize_ids(seat_ids)?;
        if ids.len() > self.config.max_seats_per_request {
            return Err(AppError::validation(format!(
                "at most {} seats may be locked per request, got {}",
                self.config.max_seats_per_request,
                ids.len()
            )));
        }
        let ttl = self.resolve_ttl(ttl_seconds)?;

        let mut guard = self.gate.acquire().await;
        let now = self.clock.now();

        let failures: Vec<SeatFailure> = ids
            .iter()
            .filter_map(|id| {
                let reason = match guard.table().get(id) {
                    None => Some(FailureReason::NotFound),
                    Some(record) => match Liveness::of(&record, now) {
                        liveness if liveness.is_claimable() => None,
                        Liveness::Confirmed => Some(FailureReason::AlreadyConfirmed),
                        _ => Some(FailureReason::ActivelyClaimed),
                    },
                };
                debug!(seat_id = %id, ?reason, "Lock validation");
                reason.map(|r| SeatFailure::new(id.clone(), r))
            })
            .collect();

        if !failures.is_empty() {
            warn!(
                requested = ids.len(),
                failed = failures.len(),
                "Lock rejected"
            );
            return Ok(LockOutcome::Rejected { failures });
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::validation("ttlSeconds is out of range"))?;
        let token = self.tokens.generate()?;
        for id in &ids {
            guard.claim(id, &token, expires_at);
        }

        info!(seats = ids.len(), expires_at = %expires_at, "Seats locked");

        Ok(LockOutcome::Locked {
            token,
            expires_at,
            seats: ids,
        })
    }

    /// Confirms every seat in `seat_ids` held under `token`, or none.
    pub async fn confirm<S: AsRef<str>>(
        &self,
        token: &str,
        seat_ids: &[S],
    ) -> AppResult<ConfirmOutcome> {
        let token = ClaimToken::new(token)?;
        let ids = normalize_ids(seat_ids)?;

        let mut guard = self.gate.acquire().await;
        let now = self.clock.now();

        let failures: Vec<SeatFailure> = ids
            .iter()
            .filter_map(|id| {
                let reason = match guard.table().get(id) {
                    None => Some(FailureReason::NotFound),
                    Some(record) => confirm_rejection(&Liveness::of(&record, now), &token),
                };
                debug!(seat_id = %id, ?reason, "Confirm validation");
                reason.map(|r| SeatFailure::new(id.clone(), r))
            })
            .collect();

        if !failures.is_empty() {
            warn!(
                requested = ids.len(),
                failed = failures.len(),
                "Confirm rejected"
            );
            return Ok(ConfirmOutcome::Rejected { failures });
        }

        for id in &ids {
            guard.confirm(id);
        }

        info!(seats = ids.len(), "Seats confirmed");

        Ok(ConfirmOutcome::Confirmed { seats: ids })
    }

    /// Releases each seat in `seat_ids` held under `token`, independently.
    ///
    /// A claim past its deadline is already void: it is reported as
    /// `NotClaimed` and physically reset.
    pub async fn release<S: AsRef<str>>(
        &self,
        token: &str,
        seat_ids: &[S],
    ) -> AppResult<ReleaseReport> {
        let token = ClaimToken::new(token)?;
        let ids = normalize_ids(seat_ids)?;

        let mut guard = self.gate.acquire().await;
        let now = self.clock.now();

        let mut details = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = match guard.table().get(&id) {
                None => ReleaseOutcome::NotFound,
                Some(record) => match Liveness::of(&record, now) {
                    Liveness::Available | Liveness::Confirmed => ReleaseOutcome::NotClaimed,
                    Liveness::Expired { .. } => {
                        guard.reset(&id);
                        ReleaseOutcome::NotClaimed
                    }
                    Liveness::Active { token: owner, .. } if *owner != token => {
                        ReleaseOutcome::TokenMismatch
                    }
                    Liveness::Active { .. } => {
                        guard.reset(&id);
                        ReleaseOutcome::Released
                    }
                },
            };
            debug!(seat_id = %id, ?outcome, "Release evaluated");
            details.push(ReleaseDetail { id, outcome });
        }

        let report = ReleaseReport { details };
        info!(
            requested = report.details.len(),
            released = report.released(),
            "Release processed"
        );

        Ok(report)
    }

    /// Returns the current view of one seat.
    pub fn get(&self, seat_id: &str) -> AppResult<SeatView> {
        let id = SeatId::new(seat_id)?;
        let now = self.clock.now();
        self.table
            .get(&id)
            .map(|record| effective_view(&record, now))
            .ok_or_else(|| AppError::not_found(format!("Seat '{id}' not found")))
    }

    /// Lazily yields the view of every seat in layout order.
    ///
    /// Does not take the exclusion gate.
    pub fn list(&self) -> impl Iterator<Item = SeatView> + '_ {
        let now = self.clock.now();
        self.table
            .list()
            .map(move |record| effective_view(&record, now))
    }

    /// Counts seats by effective status.
    pub fn summary(&self) -> SeatSummary {
        self.list().fold(SeatSummary::default(), |mut acc, view| {
            acc.record(view.status);
            acc
        })
    }

    fn resolve_ttl(&self, ttl_seconds: Option<u64>) -> AppResult<chrono::Duration> {
        let ttl = ttl_seconds.unwrap_or(self.config.default_ttl_seconds);
        if ttl == 0 {
            return Err(AppError::validation("ttlSeconds must be positive"));
        }
        if ttl > self.config.max_ttl_seconds {
            return Err(AppError::validation(format!(
                "ttlSeconds must not exceed {}",
                self.config.max_ttl_seconds
            )));
        }
        i64::try_from(ttl)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| AppError::validation("ttlSeconds is out of range"))
    }
}

/// Parses, trims, and de-duplicates requested ids, keeping first-seen order.
fn normalize_ids<S: AsRef<str>>(raw: &[S]) -> AppResult<Vec<SeatId>> {
    if raw.is_empty() {
        return Err(AppError::validation("seatIds must not be empty"));
    }

    let mut ids: Vec<SeatId> = Vec::with_capacity(raw.len());
    for value in raw {
        let id = SeatId::new(value.as_ref())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Diagnoses why a seat cannot be confirmed under `token`.
fn confirm_rejection(liveness: &Liveness<'_>, token: &ClaimToken) -> Option<FailureReason> {
    match liveness {
        Liveness::Available | Liveness::Confirmed => Some(FailureReason::NotClaimed),
        Liveness::Active { token: owner, .. } | Liveness::Expired { token: owner }
            if *owner != token =>
        {
            Some(FailureReason::TokenMismatch)
        }
        Liveness::Expired { .. } => Some(FailureReason::ClaimExpired),
        Liveness::Active { .. } => None,
    }
}
