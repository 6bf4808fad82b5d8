//! # seatlock-engine
//!
//! The reservation core of Seatlock.
//!
//! ## Modules
//!
//! - `table`: fixed seat table with non-blocking reads
//! - `exclusion`: FIFO-fair gate serializing every state mutation
//! - `expiry`: lazy liveness evaluation and the optional sweeper
//! - `token`: unguessable claim token generation
//! - `outcome`: structured results of lock, confirm, and release
//! - `service`: validate-then-mutate orchestration of the three operations

pub mod exclusion;
pub mod expiry;
pub mod outcome;
pub mod service;
pub mod table;
pub mod token;

pub use exclusion::{ExclusionGate, ExclusionGuard, TableWriter};
pub use expiry::{ExpirySweeper, Liveness};
pub use outcome::{
    ConfirmOutcome, FailureReason, LockOutcome, ReleaseDetail, ReleaseOutcome, ReleaseReport,
    SeatFailure,
};
pub use service::ReservationService;
pub use table::{SeatRecord, SeatState, SeatTable};
pub use token::TokenGenerator;
