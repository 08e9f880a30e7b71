//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_failures_convert_into_api_errors() {
        let err: ApiError = ConfigError::InvalidValue("SAVE_DELAY_MS".into(), "soon".into()).into();
        assert!(matches!(err, ApiError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for the environment variable SAVE_DELAY_MS: soon"
        );

        let err: ApiError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken").into();
        assert_eq!(err.to_string(), "IO error: taken");
    }
}
