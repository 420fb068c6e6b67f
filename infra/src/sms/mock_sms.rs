//! Log-only SMS transport for development and testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use sn_core::services::otp::SmsSender;

/// Mock SMS transport
///
/// Logs messages instead of sending them, generates mock message ids and
/// tracks the message count for tests.
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockSmsService {
    /// Create a new mock SMS transport
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a transport that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsSender for MockSmsService {
    async fn send_text(&self, phone: &str, message: &str) -> Result<String, String> {
        if self.simulate_failure {
            warn!(
                target: "sms_service",
                provider = "mock",
                "Mock SMS transport simulating failure"
            );
            return Err("simulated SMS sending failure".to_string());
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %phone,
            message_id = %message_id,
            count = count,
            content = %message,
            "Mock SMS dispatched"
        );

        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_send_returns_id_and_counts() {
        let sms = MockSmsService::new();
        let id = sms.send_text("+8801712345678", "hello").await.unwrap();
        assert!(id.starts_with("mock-"));
        assert_eq!(sms.message_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let sms = MockSmsService::failing();
        assert!(sms.send_text("+8801712345678", "hello").await.is_err());
        assert_eq!(sms.message_count(), 0);
    }
}
