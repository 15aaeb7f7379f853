//! Unified application error types for AuthPair.
//!
//! Lower layers return typed failures; the lifecycle engine maps each of
//! them to exactly one [`ErrorKind`] before returning to its caller.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Malformed caller input (e.g. an empty refresh secret).
    InvalidRequest,
    /// Failed lookup, verification mismatch, or expiry. Deliberately opaque.
    Unauthorized,
    /// The access credential could not be signed.
    SigningFailure,
    /// The refresh secret could not be hashed.
    HashingFailure,
    /// The token store rejected a read or write.
    PersistenceFailure,
    /// An outbound notification could not be delivered.
    NotificationFailure,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Returns `true` for infrastructure failures that must never expose
    /// their message to the end caller.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::SigningFailure
                | Self::HashingFailure
                | Self::PersistenceFailure
                | Self::NotificationFailure
                | Self::Configuration
                | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::SigningFailure => write!(f, "SIGNING_FAILURE"),
            Self::HashingFailure => write!(f, "HASHING_FAILURE"),
            Self::PersistenceFailure => write!(f, "PERSISTENCE_FAILURE"),
            Self::NotificationFailure => write!(f, "NOTIFICATION_FAILURE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout AuthPair.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a signing error.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailure, message)
    }

    /// Create a hashing error.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HashingFailure, message)
    }

    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PersistenceFailure, message)
    }

    /// Create a notification error.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotificationFailure, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::with_source(
            ErrorKind::PersistenceFailure,
            format!("Database error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_kinds() {
        assert!(ErrorKind::SigningFailure.is_server_error());
        assert!(ErrorKind::HashingFailure.is_server_error());
        assert!(ErrorKind::PersistenceFailure.is_server_error());
        assert!(!ErrorKind::Unauthorized.is_server_error());
        assert!(!ErrorKind::InvalidRequest.is_server_error());
    }

    #[test]
    fn test_display_includes_kind() {
        let err = AppError::unauthorized("Invalid or expired refresh token");
        assert_eq!(
            err.to_string(),
            "UNAUTHORIZED: Invalid or expired refresh token"
        );
    }

    #[test]
    fn test_clone_drops_source() {
        let io = std::io::Error::other("disk gone");
        let err = AppError::with_source(ErrorKind::PersistenceFailure, "save failed", io);
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::PersistenceFailure);
        assert!(std::error::Error::source(&cloned).is_none());
    }
}
