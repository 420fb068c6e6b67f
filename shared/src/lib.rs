//! # Shopnonagar Connect Shared
//!
//! Configuration types shared between the core domain layer and the
//! infrastructure layer. Configuration is built from explicit structs with
//! `Default` implementations and `from_env()` constructors so that nothing
//! in the system depends on ambient process state.

pub mod config;

pub use config::{DatabaseConfig, JwtConfig, SmsConfig};
