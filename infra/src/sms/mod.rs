//! SMS transport implementations.
//!
//! `BulkSmsBdSender` talks to the BulkSMSBD gateway; `MockSmsService` logs
//! messages instead of sending them. `create_sms_sender` picks one based on
//! whether gateway credentials are configured.

pub mod bulksmsbd;
pub mod mock_sms;

use async_trait::async_trait;
use tracing::warn;

use sn_core::services::otp::SmsSender;
use sn_shared::config::SmsConfig;

use crate::InfrastructureError;

pub use bulksmsbd::BulkSmsBdSender;
pub use mock_sms::MockSmsService;

/// SMS transport selected at startup
///
/// An enum rather than a trait object so the services stay statically
/// dispatched over one concrete sender type.
pub enum SmsTransport {
    /// Real BulkSMSBD gateway
    Gateway(BulkSmsBdSender),
    /// Log-only transport for development
    Mock(MockSmsService),
}

#[async_trait]
impl SmsSender for SmsTransport {
    async fn send_text(&self, phone: &str, message: &str) -> Result<String, String> {
        match self {
            SmsTransport::Gateway(sender) => sender.send_text(phone, message).await,
            SmsTransport::Mock(sender) => sender.send_text(phone, message).await,
        }
    }
}

/// Build the SMS transport for the given configuration
///
/// Falls back to the log-only mock when credentials are missing, so local
/// development never needs a gateway account.
pub fn create_sms_sender(config: SmsConfig) -> Result<SmsTransport, InfrastructureError> {
    if config.is_configured() {
        Ok(SmsTransport::Gateway(BulkSmsBdSender::new(config)?))
    } else {
        warn!("SMS gateway credentials missing, using log-only mock transport");
        Ok(SmsTransport::Mock(MockSmsService::new()))
    }
}
