//! Configuration for the token service.

use sn_shared::config::auth::JwtConfig;

/// Configuration for session token issuance and verification
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret key for HS256 signing
    pub jwt_secret: String,
    /// Session token validity in days
    pub token_validity_days: i64,
    /// Issuer claim stamped into and required of every token
    pub issuer: String,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(JwtConfig::default())
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret,
            token_validity_days: config.token_validity_days,
            issuer: config.issuer,
        }
    }
}
