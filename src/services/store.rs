//! Temporary key-value store used for window names.
//!
//! Entries only live for one browser session; absence of a key means
//! "no override" rather than an error.

use crate::tracker::WindowId;
use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::Path;

/// Store key holding the name of `window_id`
pub fn window_name_key(window_id: WindowId) -> String {
    format!("window{window_id}")
}

/// Session-scoped key-value store
///
/// Reads are asynchronous because real backends answer through the event
/// loop; writes are fire-and-forget.
#[async_trait]
pub trait TemporaryStore: Send + Sync {
    /// Look up a single key
    async fn get_one(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`
    fn set(&self, key: &str, value: &str);

    /// Delete `key` if present
    fn unset(&self, key: &str);
}

/// In-process [`TemporaryStore`] backed by a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn from_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Load a store from a JSON object of string keys to string values
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read store dump {:?}", path))?;
        let entries: HashMap<String, String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store dump {:?}", path))?;
        log::debug!("Loaded {} temporary store entries from {:?}", entries.len(), path);
        Ok(Self::from_entries(entries))
    }

    /// Current value for `key`, without going through the async interface
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl TemporaryStore for MemoryStore {
    async fn get_one(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn unset(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
