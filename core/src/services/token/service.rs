//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::services::auth::phone::mask_phone;

use super::config::TokenServiceConfig;

/// Service for issuing and verifying JWT session tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.clone()]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a session token for a user
    ///
    /// Returns the encoded token together with its validity in seconds.
    pub fn issue_for_user(&self, user: &User) -> Result<(String, i64), DomainError> {
        let mut claims = Claims::new(
            user.id,
            user.phone.clone(),
            user.role,
            self.config.token_validity_days,
        );
        claims.iss = self.config.issuer.clone();

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                event = "token_generation_failed",
                "Failed to sign session token"
            );
            DomainError::Token(TokenError::TokenGenerationFailed)
        })?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone(&user.phone),
            event = "token_issued",
            "Issued session token"
        );

        Ok((token, self.config.token_validity_days * 86400))
    }

    /// Verify a session token and return its claims
    ///
    /// Checks the signature, the expiry and the issuer; expiry maps to
    /// `TokenExpired`, everything else to `InvalidToken` so callers never
    /// learn which part of a forged token was wrong.
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            }
        })?;

        // sub must be a well-formed user id
        if data.claims.user_id().is_err() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(data.claims)
    }
}
