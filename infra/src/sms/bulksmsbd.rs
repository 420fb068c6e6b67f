//! BulkSMSBD gateway client.
//!
//! Speaks the gateway's JSON API: a POST with the api key, sender id,
//! recipient and message, answered with a numeric `response_code` where
//! `202` means accepted. The gateway wants local numbers, so the `+88`
//! country prefix is stripped before dispatch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use sn_core::services::otp::SmsSender;
use sn_shared::config::SmsConfig;

use crate::InfrastructureError;

/// Gateway response code for an accepted message
const RESPONSE_CODE_ACCEPTED: i64 = 202;

/// Request payload for the BulkSMSBD API
#[derive(Debug, Serialize)]
struct SmsApiRequest<'a> {
    api_key: &'a str,
    senderid: &'a str,
    number: &'a str,
    message: &'a str,
}

/// Response payload from the BulkSMSBD API
#[derive(Debug, Deserialize)]
struct SmsApiResponse {
    response_code: i64,
    #[serde(default)]
    success_message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// BulkSMSBD SMS sender
pub struct BulkSmsBdSender {
    client: reqwest::Client,
    config: SmsConfig,
}

impl BulkSmsBdSender {
    /// Create a new gateway client with a bounded request timeout
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        Ok(Self { client, config })
    }

    /// Strip the `+88` country prefix; the gateway expects `01XXXXXXXXX`
    fn local_number(phone: &str) -> &str {
        phone.strip_prefix("+88").unwrap_or(phone)
    }

    async fn dispatch(&self, phone: &str, message: &str) -> Result<String, InfrastructureError> {
        let payload = SmsApiRequest {
            api_key: &self.config.api_key,
            senderid: &self.config.sender_id,
            number: Self::local_number(phone),
            message,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(InfrastructureError::Http)?;

        let body: SmsApiResponse = response
            .json()
            .await
            .map_err(InfrastructureError::Http)?;

        if body.response_code != RESPONSE_CODE_ACCEPTED {
            return Err(InfrastructureError::Sms(format!(
                "gateway rejected message (code {}): {}",
                body.response_code,
                body.error_message.unwrap_or_default()
            )));
        }

        // The gateway does not return a message id; generate one for tracing
        let message_id = format!("bulksmsbd-{}", Uuid::new_v4());
        info!(
            target: "sms_service",
            provider = "bulksmsbd",
            message_id = %message_id,
            status = %body.success_message.unwrap_or_default(),
            "SMS accepted by gateway"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl SmsSender for BulkSmsBdSender {
    async fn send_text(&self, phone: &str, message: &str) -> Result<String, String> {
        self.dispatch(phone, message).await.map_err(|e| {
            error!(
                target: "sms_service",
                provider = "bulksmsbd",
                error = %e,
                "SMS dispatch failed"
            );
            e.to_string()
        })
    }
}
