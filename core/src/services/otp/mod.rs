//! OTP issuance and verification service.
//!
//! Owns the full OTP lifecycle: cooldown checks, supersede-on-resend,
//! SMS dispatch, attempt counting and consumption on success or lockout.

pub mod cleanup;
pub mod config;
pub mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{OtpCleanupConfig, OtpCleanupService};
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::SmsSender;
pub use types::SendCodeResult;
