//! # seatlock-core
//!
//! Core crate for Seatlock. Contains configuration schemas, typed
//! identifiers, the seat model, the clock abstraction, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Seatlock crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
