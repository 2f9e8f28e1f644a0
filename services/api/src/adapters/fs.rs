//! services/api/src/adapters/fs.rs
//!
//! File-backed implementation of the `StorageMedium` port: every key-value
//! pair lives in a single JSON file, loaded at open and flushed to disk on
//! each mutation. This is the stand-in for the browser profile's local
//! storage, surviving process restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use bookdash_core::ports::{StorageMedium, StoreError, StoreResult};
use tracing::warn;

/// A `StorageMedium` persisted as one JSON object on disk, with an in-memory
/// cache guarded by a mutex. Reads are served from the cache; writes flush
/// the whole map back to the file before returning.
pub struct FsMedium {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FsMedium {
    /// Opens the medium at `path`, loading any existing contents. A missing
    /// file starts empty; a malformed file is logged and also starts empty,
    /// matching the degrade-to-absent behavior of the stores' read paths.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Medium(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let values = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                StoreError::Medium(format!("failed to read {}: {e}", path.display()))
            })?;
            match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(
                        "malformed storage file {}, starting empty: {e}",
                        path.display()
                    );
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            cache: Mutex::new(values),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, String>>> {
        self.cache
            .lock()
            .map_err(|_| StoreError::Medium("storage mutex poisoned".to_string()))
    }

    /// Flushes the in-memory cache to disk.
    fn flush(&self, values: &HashMap<String, String>) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(values)
            .map_err(|e| StoreError::Medium(format!("failed to serialize storage: {e}")))?;
        std::fs::write(&self.path, content).map_err(|e| {
            StoreError::Medium(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl StorageMedium for FsMedium {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut cache = self.lock()?;
        cache.insert(key.to_string(), value.to_string());
        self.flush(&cache)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut cache = self.lock()?;
        cache.remove(key);
        self.flush(&cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, FsMedium) {
        let dir = tempfile::tempdir().unwrap();
        let medium = FsMedium::open(&dir.path().join("storage.json")).unwrap();
        (dir, medium)
    }

    #[test]
    fn get_returns_none_for_unknown_key() {
        let (_dir, medium) = setup();
        assert_eq!(medium.get("missing").unwrap(), None);
    }

    #[test]
    fn set_and_remove_round_trip() {
        let (_dir, medium) = setup();
        medium.set("k", "v").unwrap();
        assert_eq!(medium.get("k").unwrap(), Some("v".to_string()));
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        // Write in one medium instance
        {
            let medium = FsMedium::open(&path).unwrap();
            medium.set("auth_token", "session-active").unwrap();
        }

        // Reload in a new instance
        {
            let medium = FsMedium::open(&path).unwrap();
            assert_eq!(
                medium.get("auth_token").unwrap(),
                Some("session-active".to_string())
            );
        }
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{broken").unwrap();

        let medium = FsMedium::open(&path).unwrap();
        assert_eq!(medium.get("auth_token").unwrap(), None);
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/storage.json");

        let medium = FsMedium::open(&path).unwrap();
        medium.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
