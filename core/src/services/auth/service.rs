//! Main authentication service implementation

use std::sync::Arc;
use tracing;

use crate::domain::entities::otp::OtpPurpose;
use crate::domain::entities::user::User;
use crate::domain::value_objects::{AuthResponse, RegistrationData, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::otp::OtpRepository;
use crate::repositories::user::UserRepository;
use crate::services::otp::{OtpService, SendCodeResult, SmsSender};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::phone::{is_valid_phone, mask_phone, normalize_phone};

/// Authentication service orchestrating OTP login and registration
///
/// Generic over the user store, OTP store and SMS channel so the whole flow
/// runs in-memory under test.
pub struct AuthService<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsSender,
{
    /// User directory
    user_repository: Arc<U>,
    /// OTP issuance and verification
    otp_service: Arc<OtpService<O, S>>,
    /// Session token issuance
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, O, S> AuthService<U, O, S>
where
    U: UserRepository,
    O: OtpRepository,
    S: SmsSender,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<O, S>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            token_service,
            config,
        }
    }

    /// Request an OTP for login or registration
    ///
    /// The phone number is normalized to `+8801XXXXXXXXX` before any lookup,
    /// so every spelling of the same number shares one account and one rate
    /// limit. The purpose is cross-checked against the user directory up
    /// front: login requires an existing account, registration requires a
    /// free phone number. No SMS is spent on a request that could never
    /// complete.
    pub async fn send_otp(&self, phone: &str, purpose: OtpPurpose) -> DomainResult<SendCodeResult> {
        if !purpose.is_issuable() {
            return Err(DomainError::Auth(AuthError::InvalidPurpose {
                purpose: purpose.to_string(),
            }));
        }

        let canonical = normalize_phone(phone);
        if !is_valid_phone(&canonical) {
            tracing::warn!(
                phone = %mask_phone(&canonical),
                event = "invalid_phone",
                "Rejected OTP request for invalid phone number"
            );
            return Err(DomainError::Auth(AuthError::InvalidPhone {
                phone: canonical,
            }));
        }

        let exists = self.user_repository.exists_by_phone(&canonical).await?;
        match purpose {
            OtpPurpose::Login if !exists => {
                return Err(DomainError::Auth(AuthError::UserNotFound));
            }
            OtpPurpose::Registration if exists => {
                return Err(DomainError::Auth(AuthError::AlreadyRegistered));
            }
            OtpPurpose::Registration if !self.config.allow_registration => {
                return Err(DomainError::Auth(AuthError::RegistrationDisabled));
            }
            _ => {}
        }

        self.otp_service.send_code(&canonical, purpose).await
    }

    /// Verify an OTP and complete login or registration
    ///
    /// For `Registration`, `registration` must carry a valid payload; its
    /// shape is checked before the code is evaluated so a typo in the form
    /// does not consume the OTP. Uniqueness of the phone and the unit is
    /// decided after consumption, by the storage constraints.
    ///
    /// On success the user's phone is marked verified and a session token is
    /// issued.
    pub async fn verify_otp(
        &self,
        phone: &str,
        purpose: OtpPurpose,
        code: &str,
        registration: Option<RegistrationData>,
    ) -> DomainResult<AuthResponse> {
        if !purpose.is_issuable() {
            return Err(DomainError::Auth(AuthError::InvalidPurpose {
                purpose: purpose.to_string(),
            }));
        }

        let canonical = normalize_phone(phone);
        if !is_valid_phone(&canonical) {
            return Err(DomainError::Auth(AuthError::InvalidPhone {
                phone: canonical,
            }));
        }

        // Shape-check the registration payload before touching the OTP
        let registration = match purpose {
            OtpPurpose::Registration => {
                if !self.config.allow_registration {
                    return Err(DomainError::Auth(AuthError::RegistrationDisabled));
                }
                let data = registration.ok_or_else(|| {
                    DomainError::Auth(AuthError::MissingField {
                        field: "registration".to_string(),
                    })
                })?;
                Some(data.validated()?)
            }
            _ => None,
        };

        self.otp_service.check_code(&canonical, purpose, code).await?;

        let user = match purpose {
            OtpPurpose::Registration => {
                // registration is always Some on this path
                let data = registration.ok_or_else(|| DomainError::Internal {
                    message: "registration payload lost".to_string(),
                })?;
                self.register_user(&canonical, data).await?
            }
            _ => self.login_user(&canonical).await?,
        };

        let (token, expires_in) = self.token_service.issue_for_user(&user)?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone(&canonical),
            purpose = %purpose,
            event = "auth_success",
            "Authentication completed"
        );

        Ok(AuthResponse::new(
            UserProfile::from(&user),
            token,
            expires_in,
        ))
    }

    /// Create the user record after a verified registration OTP
    async fn register_user(
        &self,
        canonical: &str,
        data: RegistrationData,
    ) -> DomainResult<User> {
        // Pre-checks give friendly errors; the storage constraints remain
        // the final arbiter under concurrent registration
        if self.user_repository.exists_by_phone(canonical).await? {
            return Err(DomainError::Auth(AuthError::AlreadyRegistered));
        }
        if self
            .user_repository
            .find_by_unit(&data.building, &data.flat)
            .await?
            .is_some()
        {
            return Err(DomainError::Auth(AuthError::FlatTaken));
        }

        let mut user = User::new(data.name, canonical.to_string(), data.building, data.flat);
        user.verify();

        let user = self.user_repository.create(user).await?;
        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone(canonical),
            building = %user.building,
            flat = %user.flat,
            event = "user_registered",
            "Registered new resident"
        );
        Ok(user)
    }

    /// Resolve the user record after a verified login OTP
    async fn login_user(&self, canonical: &str) -> DomainResult<User> {
        let mut user = self
            .user_repository
            .find_by_phone(canonical)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        // A successful OTP proves phone ownership; heal older unverified rows
        if !user.is_verified {
            user.verify();
            user = self.user_repository.update(user).await?;
        }

        Ok(user)
    }
}
