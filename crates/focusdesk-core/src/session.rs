//! Completed focus session counter.

use crate::error::StoreError;
use crate::storage::{keys, KeyValueStore};

/// Count of focus countdowns that ran all the way to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounter {
    count: u64,
}

impl SessionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `focusSessions`. Missing or non-numeric values count as zero.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let count = match store.get(keys::FOCUS_SESSIONS) {
            Ok(Some(raw)) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring malformed session count");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(error = %e, "session count unreadable, starting from zero");
                0
            }
        };
        Self { count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(keys::FOCUS_SESSIONS, &self.count.to_string())
    }

    /// Zero the counter and drop the persisted key.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        self.count = 0;
        store.remove(keys::FOCUS_SESSIONS)
    }
}
