//! Session token claims for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;

/// Session token validity (7 days)
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "shopnonagar-connect";

/// Claims structure for the session token payload
///
/// The token is immutable once issued and is verified independently by
/// downstream request handlers using the same signing secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Canonical phone number of the user
    pub phone: String,

    /// Role of the user ("user" or "admin")
    pub role: UserRole,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Creates new claims for a session token
    pub fn new(user_id: Uuid, phone: String, role: UserRole, validity_days: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(validity_days);

        Self {
            sub: user_id.to_string(),
            phone,
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            "+8801712345678".to_string(),
            UserRole::User,
            TOKEN_VALIDITY_DAYS,
        );

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.phone, "+8801712345678");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.exp - claims.iat, TOKEN_VALIDITY_DAYS * 86400);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims() {
        let mut claims = Claims::new(
            Uuid::new_v4(),
            "+8801712345678".to_string(),
            UserRole::Admin,
            TOKEN_VALIDITY_DAYS,
        );
        claims.exp = Utc::now().timestamp() - 60;
        assert!(claims.is_expired());
    }
}
