//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Where the file-backed storage medium keeps its data. When unset the
    /// server runs on the in-memory medium and loses everything on exit.
    pub storage_path: Option<PathBuf>,
    /// The nominal delay applied to login and purchase operations so clients
    /// can show a transient busy state.
    pub simulated_latency: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let storage_path = std::env::var("STORAGE_PATH").map(PathBuf::from).ok();

        let latency_str =
            std::env::var("SIMULATED_LATENCY_MS").unwrap_or_else(|_| "500".to_string());
        let latency_ms = latency_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "SIMULATED_LATENCY_MS".to_string(),
                format!("'{}' is not a number of milliseconds", latency_str),
            )
        })?;

        Ok(Self {
            bind_address,
            log_level,
            storage_path,
            simulated_latency: Duration::from_millis(latency_ms),
        })
    }
}
