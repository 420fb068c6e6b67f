//! # Infrastructure Layer
//!
//! Concrete implementations behind the repository and SMS traits of
//! `sn_core`: MySQL persistence via SQLx and the BulkSMSBD gateway client,
//! plus a log-only SMS transport for development.

pub mod database;
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for the SMS gateway
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// SMS gateway error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
