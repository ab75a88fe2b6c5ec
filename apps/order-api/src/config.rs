//! Order API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `order-api` starts a working local instance.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Order API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `CONO_API_PORT` - HTTP port (default: 8080)
    /// - `CONO_DB_PATH` - SQLite file path (default: ./data/cono.db)
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("CONO_API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CONO_API_PORT".to_string()))?,

            database_path: env::var("CONO_DB_PATH")
                .unwrap_or_else(|_| "./data/cono.db".to_string())
                .into(),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only exercising the fallback path; the variables are unset in CI.
        if env::var("CONO_API_PORT").is_err() && env::var("CONO_DB_PATH").is_err() {
            let config = ApiConfig::load().unwrap();
            assert_eq!(config.http_port, 8080);
            assert_eq!(config.database_path, PathBuf::from("./data/cono.db"));
        }
    }
}
