//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{AuthError, ErrorResponse, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Every failure in this core is a recoverable per-request outcome; nothing
/// here is treated as process-fatal.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
