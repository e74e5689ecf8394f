//! Error types for the BBS service.

use thiserror::Error;

/// Common error type for the BBS service.
#[derive(Error, Debug)]
pub enum BbsError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (missing or expired session, hashing failure).
    #[error("authentication error: {0}")]
    Auth(String),

    /// A supplied password did not match the stored one.
    #[error("password mismatch: {0}")]
    BadPassword(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BbsError {
    fn from(e: sqlx::Error) -> Self {
        BbsError::Database(e.to_string())
    }
}

/// Result type alias for BBS operations.
pub type Result<T> = std::result::Result<T, BbsError>;
