//! crates/reading_tutor_core/src/ports.rs
//!
//! Defines the storage contract the view-models depend on.
//! The store is an owned object handed to a model at construction, so the core
//! never reaches for a global storage singleton.

use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A string key-value store with local-storage semantics.
///
/// Access is treated as synchronous-equivalent: a write either lands completely
/// or fails, and there is no partial-write recovery.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw stored text, or `None` if the key was never written.
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> PortResult<()>;

    async fn remove(&self, key: &str) -> PortResult<()>;
}
