//! Database configuration

use serde::{Deserialize, Serialize};

/// MySQL connection pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/shopnonagar"),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    ///
    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and
    /// `DATABASE_CONNECT_TIMEOUT`, falling back to development defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_connections),
            connect_timeout: std::env::var("DATABASE_CONNECT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert!(config.url.starts_with("mysql://"));
        assert_eq!(config.max_connections, 10);
    }
}
