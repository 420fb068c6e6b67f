//! Main OTP service implementation

use chrono::Duration;
use std::sync::Arc;
use tracing;

use crate::domain::entities::otp::{OtpCode, OtpPurpose, CODE_LENGTH};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::otp::OtpRepository;
use crate::services::auth::phone::mask_phone;

use super::config::OtpServiceConfig;
use super::traits::SmsSender;
use super::types::SendCodeResult;

/// Service for issuing and verifying one-time passwords
///
/// Generic over the OTP store and the SMS channel so tests run against
/// in-memory implementations.
pub struct OtpService<O: OtpRepository, S: SmsSender> {
    /// OTP record store
    otp_repository: Arc<O>,
    /// Outbound SMS channel
    sms_sender: Arc<S>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O: OtpRepository, S: SmsSender> OtpService<O, S> {
    /// Create a new OTP service
    pub fn new(otp_repository: Arc<O>, sms_sender: Arc<S>, config: OtpServiceConfig) -> Self {
        Self {
            otp_repository,
            sms_sender,
            config,
        }
    }

    /// Issue a new OTP for a phone number and purpose, and dispatch it by SMS
    ///
    /// When an active code already exists, the resend cooldown is measured
    /// from that code's creation time. Inside the cooldown the request is
    /// rejected with the exact wait; outside it the old code is retired and
    /// a fresh one takes its place, so at most one code per `(phone, purpose)`
    /// is ever verifiable.
    ///
    /// If SMS dispatch fails the freshly stored record is retired again, so
    /// a code that never reached the resident cannot be guessed at and does
    /// not block the next send.
    pub async fn send_code(&self, phone: &str, purpose: OtpPurpose) -> DomainResult<SendCodeResult> {
        if let Some(existing) = self.otp_repository.find_active(phone, purpose).await? {
            let wait = (self.config.resend_cooldown_seconds - existing.age_seconds()).max(0);
            if wait > 0 {
                tracing::warn!(
                    phone = %mask_phone(phone),
                    purpose = %purpose,
                    retry_after = wait,
                    event = "otp_rate_limited",
                    "OTP resend requested inside cooldown window"
                );
                return Err(DomainError::Auth(AuthError::RateLimited {
                    retry_after_seconds: wait,
                }));
            }

            // Cooldown has passed: supersede the old code
            self.otp_repository.mark_used(existing.id).await?;
            tracing::info!(
                phone = %mask_phone(phone),
                purpose = %purpose,
                superseded = %existing.id,
                event = "otp_superseded",
                "Previous OTP retired in favor of a new one"
            );
        }

        let otp = OtpCode::new_with_ttl(phone.to_string(), purpose, self.config.code_ttl_minutes);
        let otp = self.otp_repository.insert(otp).await?;

        tracing::info!(
            phone = %mask_phone(phone),
            purpose = %purpose,
            otp_id = %otp.id,
            event = "otp_generated",
            "Generated new OTP"
        );

        let message = format!(
            "Your Shopnonagar Connect verification code is: {}. \
             This code will expire in {} minutes. \
             Do not share this code with anyone.",
            otp.code, self.config.code_ttl_minutes
        );

        let message_id = match self.sms_sender.send_text(phone, &message).await {
            Ok(id) => id,
            Err(e) => {
                // A code the resident never received must not stay verifiable
                self.otp_repository.mark_used(otp.id).await?;
                tracing::error!(
                    phone = %mask_phone(phone),
                    purpose = %purpose,
                    error = %e,
                    event = "otp_dispatch_failed",
                    "SMS dispatch failed; OTP retired"
                );
                return Err(DomainError::Auth(AuthError::SmsDispatchFailed));
            }
        };

        tracing::info!(
            phone = %mask_phone(phone),
            purpose = %purpose,
            message_id = %message_id,
            event = "otp_sent",
            "OTP dispatched via SMS"
        );

        Ok(SendCodeResult {
            message_id,
            expires_in_seconds: self.config.code_ttl_minutes * 60,
            next_resend_at: otp.created_at + Duration::seconds(self.config.resend_cooldown_seconds),
        })
    }

    /// Verify a submitted code and consume the record on success
    ///
    /// Failure taxonomy, in evaluation order:
    /// - malformed input: `InvalidOtpFormat`, nothing is recorded
    /// - no active record: `OtpInvalidOrExpired`
    /// - attempts already exhausted: the record is retired and the call
    ///   fails with `TooManyAttempts` without evaluating the guess
    /// - wrong code: the attempt counter is incremented atomically and the
    ///   call fails with `InvalidOtp` carrying the remaining attempts
    ///
    /// On success the consumed record is returned for the caller's
    /// bookkeeping.
    pub async fn check_code(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        code: &str,
    ) -> DomainResult<OtpCode> {
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Auth(AuthError::InvalidOtpFormat));
        }

        let record = match self.otp_repository.find_active(phone, purpose).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    phone = %mask_phone(phone),
                    purpose = %purpose,
                    event = "otp_not_found",
                    "No active OTP for verification attempt"
                );
                return Err(DomainError::Auth(AuthError::OtpInvalidOrExpired));
            }
        };

        if record.attempts >= self.config.max_attempts {
            // Retire the record so the lane frees up for a fresh send
            self.otp_repository.mark_used(record.id).await?;
            tracing::warn!(
                phone = %mask_phone(phone),
                purpose = %purpose,
                otp_id = %record.id,
                event = "otp_attempts_exhausted",
                "OTP retired after too many failed attempts"
            );
            return Err(DomainError::Auth(AuthError::TooManyAttempts));
        }

        if !record.matches(code) {
            let attempts = self.otp_repository.increment_attempts(record.id).await?;
            let attempts_left = (self.config.max_attempts - attempts).max(0);
            tracing::warn!(
                phone = %mask_phone(phone),
                purpose = %purpose,
                attempts_left = attempts_left,
                event = "otp_mismatch",
                "OTP verification failed"
            );
            return Err(DomainError::Auth(AuthError::InvalidOtp { attempts_left }));
        }

        self.otp_repository.mark_used(record.id).await?;
        tracing::info!(
            phone = %mask_phone(phone),
            purpose = %purpose,
            otp_id = %record.id,
            event = "otp_verified",
            "OTP verified and consumed"
        );

        Ok(record)
    }
}
