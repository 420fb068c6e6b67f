//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{User, UserRole};

/// Public projection of a user
///
/// Carries only the fields that are safe to return to clients; internal
/// bookkeeping (timestamps, signing payloads) stays out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub building: String,
    pub flat: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
            building: user.building.clone(),
            flat: user.flat.clone(),
            role: user.role,
            profile_picture: user.profile_picture.clone(),
            is_verified: user.is_verified,
        }
    }
}

/// Authentication response returned after successful OTP verification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Resolved user (public fields only)
    pub user: UserProfile,

    /// Signed session token
    pub token: String,

    /// Token validity in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates a new authentication response
    pub fn new(user: UserProfile, token: String, expires_in: i64) -> Self {
        Self {
            user,
            token,
            expires_in,
        }
    }
}
