//! Configuration for the OTP service.

use crate::domain::entities::otp::{MAX_ATTEMPTS, OTP_TTL_MINUTES, RESEND_COOLDOWN_SECONDS};

/// Configuration for OTP issuance and verification
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Code lifetime in minutes
    pub code_ttl_minutes: i64,
    /// Recorded failed attempts before a code is retired
    pub max_attempts: i32,
    /// Minimum seconds between two sends for the same (phone, purpose)
    pub resend_cooldown_seconds: i64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: OTP_TTL_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
        }
    }
}
