//! Value objects exchanged with the surrounding application.

pub mod auth_response;
pub mod registration;

pub use auth_response::{AuthResponse, UserProfile};
pub use registration::RegistrationData;
