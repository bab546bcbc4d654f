//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `.env` is loaded by `main()` before this runs, so local
//! development can keep its settings in a file.

use std::env;
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,

    /// Path to the SQLite database file
    pub database_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("KWPOS_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KWPOS_PORT".to_string()))?,

            database_path: env::var("KWPOS_DATABASE_PATH")
                .unwrap_or_else(|_| "./kwpos.db".to_string())
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
