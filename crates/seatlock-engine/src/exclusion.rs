//! Exclusion gate serializing every seat mutation.
//!
//! The gate owns the only [`TableWriter`]. Holding an [`ExclusionGuard`] is
//! therefore the only way to change seat state, and dropping the guard on
//! any exit path (return, `?`, panic unwind) releases the gate.
//!
//! Waiters are served in arrival order: `tokio::sync::Mutex` queues
//! acquirers FIFO, so a steady stream of new requests cannot starve an
//! earlier one.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

use seatlock_core::types::{ClaimToken, SeatId};

use crate::table::{SeatState, SeatTable};

/// Write access to the seat table, handed out only under the gate.
#[derive(Debug)]
pub struct TableWriter {
    table: Arc<SeatTable>,
}

impl TableWriter {
    /// Read access to the table inside the critical section.
    pub fn table(&self) -> &SeatTable {
        &self.table
    }

    /// Claims `id` under `token` until `expires_at`.
    pub fn claim(&mut self, id: &SeatId, token: &ClaimToken, expires_at: DateTime<Utc>) -> bool {
        self.table.set_state(
            id,
            SeatState::Claimed {
                token: token.clone(),
                expires_at,
            },
        )
    }

    /// Marks `id` confirmed, dropping its token and deadline.
    pub fn confirm(&mut self, id: &SeatId) -> bool {
        self.table.set_state(id, SeatState::Confirmed)
    }

    /// Returns `id` to available, dropping its token and deadline.
    pub fn reset(&mut self, id: &SeatId) -> bool {
        self.table.set_state(id, SeatState::Available)
    }
}

/// FIFO-fair mutual exclusion over the seat table.
#[derive(Debug)]
pub struct ExclusionGate {
    writer: Mutex<TableWriter>,
    waiting: AtomicUsize,
}

impl ExclusionGate {
    /// Creates the gate guarding `table`.
    pub fn new(table: Arc<SeatTable>) -> Self {
        Self {
            writer: Mutex::new(TableWriter { table }),
            waiting: AtomicUsize::new(0),
        }
    }

    /// Suspends until every earlier caller has released the gate.
    pub async fn acquire(&self) -> ExclusionGuard<'_> {
        let ticket = WaitTicket::enqueue(&self.waiting);
        let start = Instant::now();

        let guard = self.writer.lock().await;

        let queued = ticket.queued_ahead;
        drop(ticket);
        trace!(
            queued_ahead = queued,
            waited_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Exclusion gate acquired"
        );

        ExclusionGuard { guard }
    }

    /// Number of callers currently queued in [`ExclusionGate::acquire`].
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }
}

/// Counts one caller in the wait queue; leaves it on drop, including when
/// the pending `acquire` future is cancelled.
struct WaitTicket<'a> {
    waiting: &'a AtomicUsize,
    queued_ahead: usize,
}

impl<'a> WaitTicket<'a> {
    fn enqueue(waiting: &'a AtomicUsize) -> Self {
        let queued_ahead = waiting.fetch_add(1, Ordering::SeqCst);
        Self {
            waiting,
            queued_ahead,
        }
    }
}

impl Drop for WaitTicket<'_> {
    fn drop(&mut self) {
        self.waiting.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Scoped hold on the [`ExclusionGate`]; released on drop.
#[derive(Debug)]
pub struct ExclusionGuard<'a> {
    guard: MutexGuard<'a, TableWriter>,
}

impl Deref for ExclusionGuard<'_> {
    type Target = TableWriter;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for ExclusionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
