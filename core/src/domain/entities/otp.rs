//! One-time password entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AuthError;

/// Maximum number of recorded failed attempts before a code is retired
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the OTP code
pub const CODE_LENGTH: usize = 6;

/// Expiration time for OTP codes (10 minutes)
pub const OTP_TTL_MINUTES: i64 = 10;

/// Minimum seconds between issuing two codes for the same (phone, purpose)
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Intent context of an OTP exchange
///
/// `PasswordReset` exists in the stored data model but is not issuable
/// through this core; `send_otp`/`verify_otp` reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Login,
    Registration,
    PasswordReset,
}

impl OtpPurpose {
    /// String form used as the storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Registration => "registration",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }

    /// Whether this purpose may be issued and verified through the auth core
    pub fn is_issuable(&self) -> bool {
        matches!(self, OtpPurpose::Login | OtpPurpose::Registration)
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(OtpPurpose::Login),
            "registration" => Ok(OtpPurpose::Registration),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            other => Err(AuthError::InvalidPurpose {
                purpose: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-time password entity
///
/// Lifecycle: `Active -> (expired | used-by-supersede | used-by-success |
/// used-by-lockout) -> terminal`. No transition re-activates a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Canonical phone number this code was sent to (+8801XXXXXXXXX)
    pub phone: String,

    /// The 6-digit code
    pub code: String,

    /// Intent context this code was issued for
    pub purpose: OtpPurpose,

    /// Number of recorded failed verification attempts
    pub attempts: i32,

    /// Whether the code has been consumed (success, supersede, or lockout)
    pub is_used: bool,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Creates a new OTP with a cryptographically secure random 6-digit code
    /// and the default 10 minute TTL
    pub fn new(phone: String, purpose: OtpPurpose) -> Self {
        Self::new_with_ttl(phone, purpose, OTP_TTL_MINUTES)
    }

    /// Creates a new OTP with a custom TTL in minutes
    pub fn new_with_ttl(phone: String, purpose: OtpPurpose, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            code: Self::generate_code(),
            purpose,
            attempts: 0,
            is_used: false,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    /// Generates a random 6-digit code using the OS CSPRNG
    ///
    /// The OTP is the sole authentication factor, so `OsRng` rather than the
    /// thread-local generator.
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias over 2^32 is negligible for a 6-digit code
        format!("{:06}", num % 1_000_000)
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is active (not used and not expired)
    pub fn is_active(&self) -> bool {
        !self.is_used && !self.is_expired()
    }

    /// Seconds elapsed since the code was created
    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.created_at).num_seconds()
    }

    /// Seconds the caller must wait before a resend is allowed, zero if the
    /// cooldown has passed
    pub fn resend_wait_seconds(&self) -> i64 {
        (RESEND_COOLDOWN_SECONDS - self.age_seconds()).max(0)
    }

    /// Constant-time comparison of a submitted code against this record
    pub fn matches(&self, input_code: &str) -> bool {
        if input_code.len() != self.code.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Number of failed attempts still allowed (0 if exhausted)
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Marks the record as used; terminal state
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_otp_code() {
        let otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Login);

        assert_eq!(otp.phone, "+8801712345678");
        assert_eq!(otp.code.len(), CODE_LENGTH);
        assert_eq!(otp.purpose, OtpPurpose::Login);
        assert_eq!(otp.attempts, 0);
        assert!(!otp.is_used);
        assert!(!otp.is_expired());
        assert!(otp.is_active());
        assert_eq!(otp.expires_at, otp.created_at + Duration::minutes(OTP_TTL_MINUTES));
    }

    #[test]
    fn test_generate_code_format() {
        for _ in 0..100 {
            let code = OtpCode::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: Vec<String> = (0..100).map(|_| OtpCode::generate_code()).collect();
        let unique = codes.iter().collect::<std::collections::HashSet<_>>().len();
        assert!(unique > 1);
    }

    #[test]
    fn test_matches_constant_time() {
        let mut otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Login);
        otp.code = "123456".to_string();

        assert!(otp.matches("123456"));
        assert!(!otp.matches("654321"));
        assert!(!otp.matches("12345"));
        assert!(!otp.matches(""));
    }

    #[test]
    fn test_expired_code_is_not_active() {
        let mut otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Login);
        otp.expires_at = Utc::now() - Duration::seconds(1);

        assert!(otp.is_expired());
        assert!(!otp.is_active());
    }

    #[test]
    fn test_used_code_is_not_active() {
        let mut otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Registration);
        otp.mark_used();
        assert!(!otp.is_active());
    }

    #[test]
    fn test_remaining_attempts() {
        let mut otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Login);
        assert_eq!(otp.remaining_attempts(), MAX_ATTEMPTS);

        otp.attempts = 2;
        assert_eq!(otp.remaining_attempts(), 1);

        otp.attempts = 5;
        assert_eq!(otp.remaining_attempts(), 0);
    }

    #[test]
    fn test_resend_wait_seconds() {
        let mut otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Login);
        let wait = otp.resend_wait_seconds();
        assert!(wait > 0 && wait <= RESEND_COOLDOWN_SECONDS);

        otp.created_at = Utc::now() - Duration::seconds(RESEND_COOLDOWN_SECONDS + 5);
        assert_eq!(otp.resend_wait_seconds(), 0);
    }

    #[test]
    fn test_purpose_round_trip() {
        for purpose in [OtpPurpose::Login, OtpPurpose::Registration, OtpPurpose::PasswordReset] {
            let parsed: OtpPurpose = purpose.as_str().parse().unwrap();
            assert_eq!(parsed, purpose);
        }
        assert!("signup".parse::<OtpPurpose>().is_err());
    }

    #[test]
    fn test_purpose_issuable() {
        assert!(OtpPurpose::Login.is_issuable());
        assert!(OtpPurpose::Registration.is_issuable());
        assert!(!OtpPurpose::PasswordReset.is_issuable());
    }

    #[test]
    fn test_serialization() {
        let otp = OtpCode::new("+8801712345678".to_string(), OtpPurpose::Registration);
        let json = serde_json::to_string(&otp).unwrap();
        assert!(json.contains("\"registration\""));
        let deserialized: OtpCode = serde_json::from_str(&json).unwrap();
        assert_eq!(otp, deserialized);
    }
}
