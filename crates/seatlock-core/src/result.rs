//! Convenience result type alias for Seatlock.

use crate::error::AppError;

/// A specialized `Result` type for Seatlock operations.
pub type AppResult<T> = Result<T, AppError>;
