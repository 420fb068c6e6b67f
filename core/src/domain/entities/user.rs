//! User entity representing a registered resident of the community.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a resident's name
pub const MAX_NAME_LENGTH: usize = 100;

/// Buildings of the community; a user's building must be one of these
pub const BUILDINGS: [&str; 10] = [
    "Building 1",
    "Building 2",
    "Building 3",
    "Building 4",
    "Building 5",
    "Building 6",
    "Building 7",
    "Building 8",
    "Building 9",
    "Building 10",
];

/// Valid flat numbers: A1-H13
static FLAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-H](1[0-3]|[1-9])$").unwrap());

/// Role of a user in the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User entity representing a registered resident
///
/// Invariants enforced by the user directory: `phone` is unique across all
/// users, and so is the `(building, flat)` pair - at most one resident per
/// unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Resident's display name
    pub name: String,

    /// Canonical phone number (+8801XXXXXXXXX), unique
    pub phone: String,

    /// Building of the resident's unit
    pub building: String,

    /// Flat number within the building (A1-H13)
    pub flat: String,

    /// Optional profile picture URL
    pub profile_picture: Option<String>,

    /// Role of the user
    pub role: UserRole,

    /// Whether the user's phone number has been verified
    pub is_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified resident with the `User` role
    pub fn new(name: String, phone: String, building: String, flat: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            phone,
            building,
            flat,
            profile_picture: None,
            role: UserRole::User,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the user's phone as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Checks if the user is an admin
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Checks whether a building name is one of the community's buildings
pub fn is_valid_building(building: &str) -> bool {
    BUILDINGS.contains(&building)
}

/// Checks whether a flat number matches the A1-H13 pattern
pub fn is_valid_flat(flat: &str) -> bool {
    FLAT_REGEX.is_match(flat)
}
