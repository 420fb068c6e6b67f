//! SMS gateway configuration (BulkSMSBD)

use serde::{Deserialize, Serialize};

/// Default BulkSMSBD API endpoint
pub const DEFAULT_API_URL: &str = "https://api.bulksmsbd.com/api/smsapi";

/// BulkSMSBD gateway configuration
///
/// When `api_key` or `sender_id` is empty the SMS factory falls back to the
/// log-only mock transport, so development environments work without
/// credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// BulkSMSBD API key
    pub api_key: String,

    /// Approved sender id
    pub sender_id: String,

    /// Gateway endpoint URL
    pub api_url: String,

    /// Bounded timeout for gateway requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sender_id: String::new(),
            api_url: String::from(DEFAULT_API_URL),
            request_timeout_secs: 10,
        }
    }
}

impl SmsConfig {
    /// Create a configuration with explicit credentials
    pub fn new(api_key: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Reads `BULKSMSBD_API_KEY`, `BULKSMSBD_SENDER_ID` and the optional
    /// `BULKSMSBD_TIMEOUT_SECS`. Missing credentials leave the fields empty,
    /// which selects the mock transport.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("BULKSMSBD_API_KEY").unwrap_or_default(),
            sender_id: std::env::var("BULKSMSBD_SENDER_ID").unwrap_or_default(),
            api_url: std::env::var("BULKSMSBD_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: std::env::var("BULKSMSBD_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Whether real gateway credentials are present
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.sender_id.is_empty()
    }
}
