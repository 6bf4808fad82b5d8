//! Fixed seat table.
//!
//! The set of seat ids is decided once at construction. Reads go straight
//! to the concurrent map and never wait on the exclusion gate; writes are
//! crate-private and reachable only through [`crate::exclusion::TableWriter`].

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use seatlock_core::types::{ClaimToken, SeatId, SeatLayout, SeatStatus};

/// Physical reservation state of a seat.
///
/// The token and deadline live inside the `Claimed` variant, so they are
/// present together and only while the seat is claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatState {
    /// Free to be claimed.
    Available,
    /// Held under `token` until `expires_at`.
    Claimed {
        /// Token of the lock request that produced this claim.
        token: ClaimToken,
        /// Instant after which the claim is void.
        expires_at: DateTime<Utc>,
    },
    /// Permanently booked.
    Confirmed,
}

/// A seat and its physical state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRecord {
    /// Seat identifier.
    pub id: SeatId,
    /// Physical state, not yet adjusted for expiry.
    pub state: SeatState,
}

impl SeatRecord {
    /// Creates an available seat.
    pub fn available(id: SeatId) -> Self {
        Self {
            id,
            state: SeatState::Available,
        }
    }

    /// Physical status.
    pub fn status(&self) -> SeatStatus {
        match self.state {
            SeatState::Available => SeatStatus::Available,
            SeatState::Claimed { .. } => SeatStatus::Claimed,
            SeatState::Confirmed => SeatStatus::Confirmed,
        }
    }

    /// Claim token, if claimed.
    pub fn claim_token(&self) -> Option<&ClaimToken> {
        match &self.state {
            SeatState::Claimed { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Claim deadline, if claimed.
    pub fn claim_expires_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            SeatState::Claimed { expires_at, .. } => Some(expires_at),
            _ => None,
        }
    }
}

/// Keyed store of every seat, in layout order.
#[derive(Debug)]
pub struct SeatTable {
    /// Seat ids in layout order.
    order: Vec<SeatId>,
    /// Seat records keyed by id.
    seats: DashMap<SeatId, SeatRecord>,
}

impl SeatTable {
    /// Populates the table with every seat in `layout`, all available.
    pub fn new(layout: &SeatLayout) -> Self {
        let seats = DashMap::with_capacity(layout.len());
        for id in layout.ids() {
            seats.insert(id.clone(), SeatRecord::available(id.clone()));
        }

        Self {
            order: layout.ids().to_vec(),
            seats,
        }
    }

    /// Returns a copy of the seat record, or `None` for an unknown id.
    pub fn get(&self, id: &SeatId) -> Option<SeatRecord> {
        self.seats.get(id).map(|entry| entry.value().clone())
    }

    /// Lazily yields every seat record in layout order.
    ///
    /// Each record is read when the iterator reaches it, so a long scan can
    /// observe a mix of states from before and after a concurrent mutation.
    /// Calling `list` again restarts from the first seat.
    pub fn list(&self) -> impl Iterator<Item = SeatRecord> + '_ {
        self.order.iter().filter_map(|id| self.get(id))
    }

    /// Number of seats.
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Overwrites the state of an existing seat.
    ///
    /// Unknown ids are ignored; the id set never grows.
    pub(crate) fn set_state(&self, id: &SeatId, state: SeatState) -> bool {
        match self.seats.get_mut(id) {
            Some(mut entry) => {
                entry.state = state;
                true
            }
            None => false,
        }
    }
}
