//! Result types for OTP service operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of sending an OTP
///
/// Deliberately excludes the code itself; the only road to the code is the
/// resident's phone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResult {
    /// Message id returned by the SMS gateway
    pub message_id: String,
    /// Seconds until the code expires
    pub expires_in_seconds: i64,
    /// Earliest instant a resend will be accepted
    pub next_resend_at: DateTime<Utc>,
}
