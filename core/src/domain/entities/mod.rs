//! Domain entities representing core business objects.

pub mod otp;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use otp::{OtpCode, OtpPurpose, CODE_LENGTH, MAX_ATTEMPTS, OTP_TTL_MINUTES, RESEND_COOLDOWN_SECONDS};
pub use token::{Claims, JWT_ISSUER, TOKEN_VALIDITY_DAYS};
pub use user::{User, UserRole, BUILDINGS, MAX_NAME_LENGTH};
