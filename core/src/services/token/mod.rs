//! Session token service.
//!
//! Issues and verifies HS256-signed JWT session tokens. Tokens are
//! self-contained: verification needs only the signing secret, never the
//! database.

pub mod config;
pub mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
