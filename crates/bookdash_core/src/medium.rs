//! crates/bookdash_core/src/medium.rs
//!
//! The reference implementation of the `StorageMedium` port: a plain
//! in-memory map. The service crate provides a file-backed medium for data
//! that must survive restarts; this one backs tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{StorageMedium, StoreError, StoreResult};

/// An in-memory `StorageMedium` holding everything in a mutex-guarded map.
#[derive(Default)]
pub struct MemoryMedium {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryMedium {
    /// Creates an empty medium.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| StoreError::Medium("storage mutex poisoned".to_string()))
    }
}

impl StorageMedium for MemoryMedium {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_key() {
        let medium = MemoryMedium::new();
        assert_eq!(medium.get("missing").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let medium = MemoryMedium::new();
        medium.set("k", "v").unwrap();
        assert_eq!(medium.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn set_replaces_previous_value() {
        let medium = MemoryMedium::new();
        medium.set("k", "old").unwrap();
        medium.set("k", "new").unwrap();
        assert_eq!(medium.get("k").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn remove_clears_key_and_tolerates_absent() {
        let medium = MemoryMedium::new();
        medium.set("k", "v").unwrap();
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
        medium.remove("k").unwrap();
    }
}
