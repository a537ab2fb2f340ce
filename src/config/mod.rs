//! Configuration module for the invitation backend.
//!
//! All configuration is loaded once from environment variables with sensible defaults
//! and handed to the rest of the application through `AppState`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection string of the record store (SQLite URL)
    pub database_url: String,
    /// Maximum number of pooled store connections
    pub max_connections: u32,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Directory served by `GET /api/files/{filename}`
    pub data_dir: PathBuf,
    /// Directory of static site assets
    pub public_dir: PathBuf,
}

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/invitation.sqlite".to_string());

        let max_connections = env::var("INVITE_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError {
                variable: "INVITE_DB_MAX_CONNECTIONS",
                message: e.to_string(),
            })?;

        let bind_addr = env::var("INVITE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError {
                variable: "INVITE_BIND_ADDR",
                message: e.to_string(),
            })?;

        let log_level = env::var("INVITE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = env::var("INVITE_DATA_DIR")
            .unwrap_or_else(|_| "./data/files".to_string())
            .into();

        let public_dir = env::var("INVITE_PUBLIC_DIR")
            .unwrap_or_else(|_| "./public".to_string())
            .into();

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            log_level,
            data_dir,
            public_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "DATABASE_URL",
        "INVITE_DB_MAX_CONNECTIONS",
        "INVITE_BIND_ADDR",
        "INVITE_LOG_LEVEL",
        "INVITE_DATA_DIR",
        "INVITE_PUBLIC_DIR",
    ];

    // Both cases touch process-wide env vars, so they run in one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite:./data/invitation.sqlite");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.data_dir, PathBuf::from("./data/files"));
        assert_eq!(config.public_dir, PathBuf::from("./public"));

        env::set_var("INVITE_BIND_ADDR", "not-an-address");
        let err = Config::from_env().unwrap_err();
        assert_eq!(err.variable, "INVITE_BIND_ADDR");
        env::remove_var("INVITE_BIND_ADDR");
    }
}
