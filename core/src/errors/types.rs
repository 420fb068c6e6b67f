//! Error types for the OTP authentication and token operations.
//!
//! Every failure carries a machine-distinguishable kind plus a human-readable
//! message; the `ErrorResponse` conversions expose stable error codes for the
//! presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid phone number: {phone}")]
    InvalidPhone { phone: String },

    #[error("Invalid OTP purpose: {purpose}")]
    InvalidPurpose { purpose: String },

    #[error("OTP must be 6 digits")]
    InvalidOtpFormat,

    #[error("User already exists with this phone number")]
    AlreadyRegistered,

    #[error("No account found with this phone number")]
    UserNotFound,

    #[error("Please wait {retry_after_seconds} seconds before requesting another OTP")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Failed to send OTP. Please try again")]
    SmsDispatchFailed,

    #[error("Invalid or expired OTP")]
    OtpInvalidOrExpired,

    #[error("Too many failed attempts. Please request a new OTP")]
    TooManyAttempts,

    #[error("Invalid OTP. {attempts_left} attempt(s) remaining")]
    InvalidOtp { attempts_left: i32 },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("This flat is already registered to another user")]
    FlatTaken,

    #[error("Registration is currently disabled")]
    RegistrationDisabled,

    #[error("Conflicting write detected: {resource}")]
    Conflict { resource: String },
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected at most: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Pattern mismatch: {field}")]
    PatternMismatch { field: String },
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::InvalidPhone { .. } => "INVALID_PHONE",
            AuthError::InvalidPurpose { .. } => "INVALID_PURPOSE",
            AuthError::InvalidOtpFormat => "INVALID_OTP_FORMAT",
            AuthError::AlreadyRegistered => "ALREADY_REGISTERED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::RateLimited { .. } => "RATE_LIMITED",
            AuthError::SmsDispatchFailed => "SMS_DISPATCH_FAILED",
            AuthError::OtpInvalidOrExpired => "OTP_INVALID_OR_EXPIRED",
            AuthError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AuthError::InvalidOtp { .. } => "INVALID_OTP",
            AuthError::MissingField { .. } => "MISSING_FIELD",
            AuthError::FlatTaken => "FLAT_TAKEN",
            AuthError::RegistrationDisabled => "REGISTRATION_DISABLED",
            AuthError::Conflict { .. } => "CONFLICT",
        };

        // Numeric hints travel as structured details so clients never have
        // to parse them out of the message text.
        let response = ErrorResponse::new(error_code, err.to_string());
        match err {
            AuthError::RateLimited {
                retry_after_seconds,
            } => response.with_detail("retry_after", serde_json::json!(retry_after_seconds)),
            AuthError::InvalidOtp { attempts_left } => {
                response.with_detail("attempts_left", serde_json::json!(attempts_left))
            }
            _ => response,
        }
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        };
        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let error_code = match &err {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::InvalidLength { .. } => "INVALID_LENGTH",
            ValidationError::PatternMismatch { .. } => "PATTERN_MISMATCH",
        };
        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_response_carries_retry_hint() {
        let err = AuthError::RateLimited {
            retry_after_seconds: 42,
        };
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "RATE_LIMITED");
        assert_eq!(response.details.unwrap()["retry_after"], 42);
    }

    #[test]
    fn test_invalid_otp_response_carries_attempts_left() {
        let err = AuthError::InvalidOtp { attempts_left: 1 };
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "INVALID_OTP");
        assert_eq!(response.details.unwrap()["attempts_left"], 1);
    }

    #[test]
    fn test_token_error_conversion() {
        let response: ErrorResponse = TokenError::TokenExpired.into();
        assert_eq!(response.error, "TOKEN_EXPIRED");
        assert!(response.message.contains("expired"));
    }

    #[test]
    fn test_flat_taken_message() {
        let err = AuthError::FlatTaken;
        assert!(err.to_string().contains("already registered"));
    }
}
