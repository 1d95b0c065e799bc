//! Persistent key/value storage.
//!
//! Every piece of widget state is persisted as an opaque string under a
//! well-known key. The core only talks to the [`KeyValueStore`] capability;
//! [`Database`] backs it with SQLite for the CLI and [`MemoryStore`] backs it
//! in tests.

mod config;
pub mod database;

pub use config::{AssistantConfig, Config, QuoteConfig, TimerConfig};
pub use database::Database;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Well-known store keys.
pub mod keys {
    /// Serialized array of task records.
    pub const TASKS: &str = "tasks";
    /// Decimal count of completed focus sessions.
    pub const FOCUS_SESSIONS: &str = "focusSessions";
    /// Selected assistant persona name.
    pub const ASSISTANT: &str = "assistant";
    /// `"1"` when the assistant panel is minimized, `"0"` otherwise.
    pub const ASSISTANT_MIN: &str = "assistantMin";
    /// Saved display name.
    pub const USER_NAME: &str = "userName";
    /// Timer mode and remaining seconds.
    pub const TIMER: &str = "timer";
}

/// Minimal string-to-string durable store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON value.
///
/// Missing keys, unreadable stores and malformed payloads all come back as
/// `None`; persisted data is never a reason to fail.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed persisted value, treating as absent");
            None
        }
    }
}

/// Encode a value as JSON and write it.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)
        .map_err(|e| StoreError::QueryFailed(format!("cannot encode '{key}': {e}")))?;
    store.set(key, &json)
}

/// Returns `~/.config/focusdesk[-dev]/` based on FOCUSDESK_ENV.
///
/// Set FOCUSDESK_ENV=dev to use the development data directory, or
/// FOCUSDESK_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("FOCUSDESK_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSDESK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusdesk-dev")
            } else {
                base_dir.join("focusdesk")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // removing an absent key is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn load_json_treats_garbage_as_absent() {
        let mut store = MemoryStore::new();
        store.set(keys::TASKS, "{not json").unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, keys::TASKS);
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_json() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "nums", &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_json(&store, "nums");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
