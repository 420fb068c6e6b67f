//! Registration payload supplied alongside a registration-purpose OTP.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{is_valid_building, is_valid_flat, MAX_NAME_LENGTH};
use crate::errors::{AuthError, DomainError, ValidationError};

/// Caller-supplied data required to create a user on first registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationData {
    /// Resident's display name
    pub name: String,
    /// Building of the resident's unit
    pub building: String,
    /// Flat number within the building
    pub flat: String,
}

impl RegistrationData {
    pub fn new(
        name: impl Into<String>,
        building: impl Into<String>,
        flat: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            building: building.into(),
            flat: flat.into(),
        }
    }

    /// Validates the payload and returns a normalized copy (trimmed name)
    ///
    /// Presence failures surface as `MissingField`; format failures as
    /// validation errors so callers can distinguish "forgot a field" from
    /// "typed it wrong".
    pub fn validated(&self) -> Result<RegistrationData, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField {
                field: "name".to_string(),
            }
            .into());
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::InvalidLength {
                field: "name".to_string(),
                expected: MAX_NAME_LENGTH,
                actual: name.len(),
            }
            .into());
        }

        if self.building.is_empty() {
            return Err(AuthError::MissingField {
                field: "building".to_string(),
            }
            .into());
        }
        if !is_valid_building(&self.building) {
            return Err(ValidationError::InvalidFormat {
                field: "building".to_string(),
            }
            .into());
        }

        if self.flat.is_empty() {
            return Err(AuthError::MissingField {
                field: "flat".to_string(),
            }
            .into());
        }
        if !is_valid_flat(&self.flat) {
            return Err(ValidationError::PatternMismatch {
                field: "flat".to_string(),
            }
            .into());
        }

        Ok(RegistrationData {
            name: name.to_string(),
            building: self.building.clone(),
            flat: self.flat.clone(),
        })
    }
}
