//! Shared domain types.

pub mod id;
pub mod seat;

pub use id::{ClaimToken, SeatId};
pub use seat::{SeatLayout, SeatStatus, SeatSummary, SeatView};
