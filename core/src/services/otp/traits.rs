//! Trait for the outbound SMS channel.

use async_trait::async_trait;

/// Outbound SMS channel
///
/// Implemented by the gateway client in the infrastructure layer and by a
/// log-only sender for development. Returns the provider's message id on
/// success and an error description on failure; the service maps failures
/// onto its own error taxonomy.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a text message to a phone number in canonical form
    async fn send_text(&self, phone: &str, message: &str) -> Result<String, String>;
}
