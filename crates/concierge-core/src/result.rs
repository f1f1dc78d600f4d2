//! Convenience result type alias for Concierge.

use crate::error::AppError;

/// A specialized `Result` type for Concierge operations.
pub type AppResult<T> = Result<T, AppError>;
