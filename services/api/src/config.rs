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
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// File backing the local key-value store. In-memory when unset.
    pub storage_path: Option<PathBuf>,
    pub profile_storage_key: String,
    /// Simulated latency before a profile save completes.
    pub save_delay: Duration,
    /// Simulated latency before login or registration completes.
    pub auth_delay: Duration,
    pub allowed_origin: String,
    /// Reader sessions kept open at once; the least recently used is closed first.
    pub max_open_readers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            storage_path: None,
            profile_storage_key: "userProfile".to_string(),
            save_delay: Duration::from_millis(1000),
            auth_delay: Duration::from_millis(1000),
            allowed_origin: "http://localhost:3000".to_string(),
            max_open_readers: 64,
        }
    }
}

fn millis_var(name: &str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

fn capacity_var(name: &str, default: usize) -> Result<usize, ConfigError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue(
            name.to_string(),
            "must be at least 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::InvalidValue(name.to_string(), e.to_string())),
    }
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
        let defaults = Config::default();

        // --- Load Server Settings ---
        let bind_address = match std::env::var("BIND_ADDRESS") {
            Ok(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            Err(_) => defaults.bind_address,
        };

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            std::env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin);

        // --- Load Storage Settings ---
        let storage_path = std::env::var("STORAGE_PATH").ok().map(PathBuf::from);
        let profile_storage_key =
            std::env::var("PROFILE_STORAGE_KEY").unwrap_or(defaults.profile_storage_key);
        if profile_storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "PROFILE_STORAGE_KEY".to_string(),
                "key must not be empty".to_string(),
            ));
        }

        // --- Load Simulated Latency ---
        let save_delay = millis_var("SAVE_DELAY_MS", defaults.save_delay)?;
        let auth_delay = millis_var("AUTH_DELAY_MS", defaults.auth_delay)?;

        // --- Load Reader Limits ---
        let max_open_readers = capacity_var("MAX_OPEN_READERS", defaults.max_open_readers)?;

        Ok(Self {
            bind_address,
            log_level,
            storage_path,
            profile_storage_key,
            save_delay,
            auth_delay,
            allowed_origin,
            max_open_readers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_var_falls_back_when_unset() {
        let fallback = Duration::from_millis(250);
        let value = millis_var("READING_TUTOR_TEST_UNSET_MS", fallback).unwrap();
        assert_eq!(value, Duration::from_millis(250));
    }

    #[test]
    fn millis_var_parses_and_rejects() {
        std::env::set_var("READING_TUTOR_TEST_DELAY_MS", "40");
        let value = millis_var("READING_TUTOR_TEST_DELAY_MS", Duration::ZERO).unwrap();
        assert_eq!(value, Duration::from_millis(40));

        std::env::set_var("READING_TUTOR_TEST_BAD_MS", "soon");
        let err = millis_var("READING_TUTOR_TEST_BAD_MS", Duration::ZERO).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue(name, _) if name == "READING_TUTOR_TEST_BAD_MS")
        );
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.profile_storage_key, "userProfile");
        assert_eq!(config.save_delay, Duration::from_millis(1000));
        assert!(config.storage_path.is_none());
        assert_eq!(config.max_open_readers, 64);
    }

    #[test]
    fn reader_capacity_must_be_positive() {
        std::env::set_var("READING_TUTOR_TEST_ZERO_READERS", "0");
        assert!(capacity_var("READING_TUTOR_TEST_ZERO_READERS", 8).is_err());

        std::env::set_var("READING_TUTOR_TEST_FEW_READERS", "3");
        assert_eq!(capacity_var("READING_TUTOR_TEST_FEW_READERS", 8).unwrap(), 3);
        assert_eq!(capacity_var("READING_TUTOR_TEST_UNSET_READERS", 8).unwrap(), 8);
    }
}
