//! services/api/src/adapters/local_storage.rs
//!
//! A file-backed implementation of the `KeyValueStore` port. The whole store is a
//! single JSON object mapping keys to raw string values, the same shape a
//! browser's local storage exposes.

use async_trait::async_trait;
use reading_tutor_core::ports::{KeyValueStore, PortError, PortResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A key-value store persisted to one JSON file.
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles so concurrent writers don't lose updates.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> PortResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                PortError::Unexpected(format!(
                    "Storage file {} is not a JSON object: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> PortResult<()> {
        let text =
            serde_json::to_string_pretty(map).map_err(|e| PortError::Unexpected(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }

        // Write to a sibling file and rename, so readers never see a half-written store.
        let tmp = temp_path(&self.path);
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

/// The sibling file a write goes through: `store.json` becomes `store.jsonpart`.
fn temp_path(path: &Path) -> PathBuf {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    path.with_extension(format!("{}part", extension))
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await?;
        debug!(key, path = %self.path.display(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}
