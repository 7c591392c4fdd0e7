//! Convenience result type alias for Cloud Drive.

use crate::error::AppError;

/// A specialized `Result` type for Cloud Drive operations.
pub type AppResult<T> = Result<T, AppError>;
