//! Key-value storage for client identity.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, StudioError};

/// A small persistent key-value store, the client-side analogue of browser
/// local storage.
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`, `Ok(None)` when absent.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used in tests and when no persistent location exists.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StudioError::internal(format!("session store lock poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StudioError::internal(format!("session store lock poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
