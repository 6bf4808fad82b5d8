//! Core traits implemented by infrastructure and test doubles.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
