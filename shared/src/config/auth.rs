//! Authentication configuration

use serde::{Deserialize, Serialize};

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token validity in days
    pub token_validity_days: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            token_validity_days: 7,
            issuer: String::from("shopnonagar-connect"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token validity in days
    pub fn with_validity_days(mut self, days: i64) -> Self {
        self.token_validity_days = days;
        self
    }

    /// Create from environment variables
    ///
    /// Reads `JWT_SECRET` and `JWT_TOKEN_VALIDITY_DAYS`, falling back to
    /// development defaults when unset.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let token_validity_days = std::env::var("JWT_TOKEN_VALIDITY_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7);

        Self {
            secret,
            token_validity_days,
            issuer: String::from("shopnonagar-connect"),
        }
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}
