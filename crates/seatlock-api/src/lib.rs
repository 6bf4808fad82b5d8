//! # seatlock-api
//!
//! HTTP boundary for Seatlock built on Axum.
//!
//! Translates JSON requests into reservation service calls and maps
//! outcomes and errors onto HTTP responses. Holds no reservation state of
//! its own.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
