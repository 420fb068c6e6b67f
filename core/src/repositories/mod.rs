//! Repository interfaces consumed by the domain services.
//!
//! Concrete persistence implementations live in the infrastructure layer;
//! the in-memory mocks here back the service test suites.

pub mod otp;
pub mod user;

pub use otp::{MockOtpRepository, OtpRepository};
pub use user::{MockUserRepository, UserRepository};
