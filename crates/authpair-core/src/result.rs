//! Convenience result type alias for AuthPair.

use crate::error::AppError;

/// A specialized `Result` type for AuthPair operations.
pub type AppResult<T> = Result<T, AppError>;
