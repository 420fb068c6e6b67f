//! Configuration module for Shopnonagar Connect services.

pub mod auth;
pub mod database;
pub mod sms;

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use sms::SmsConfig;
