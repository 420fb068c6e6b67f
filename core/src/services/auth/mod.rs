//! Authentication orchestration service.
//!
//! Ties together phone normalization, the user directory, the OTP service
//! and the token service into the two public operations: `send_otp` and
//! `verify_otp`.

pub mod config;
pub mod phone;
pub mod service;


pub use config::AuthServiceConfig;
pub use service::AuthService;
