//! Configuration for the authentication service.

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether new registrations are accepted
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
        }
    }
}
