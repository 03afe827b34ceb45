//! Per-client session identity.
//!
//! A stable opaque identifier is generated once, persisted in a
//! [`SessionStore`], and sent with demo requests as a correlation and
//! rate-limiting token.

mod generator;
mod store;

use std::sync::{Arc, Mutex};

pub use generator::{fallback_session_id, generate_session_id};
pub use store::{MemorySessionStore, SessionStore};

/// Storage key used by the discovery demo.
pub const DISCOVERY_SESSION_KEY: &str = "discovery_demo_session";

/// Lazily initialised, process-wide client identity backed by a store.
///
/// The first successful lookup is cached; storage failures never surface to
/// callers and yield an identifier that lives only in memory.
pub struct SessionIdentity {
    store: Arc<dyn SessionStore>,
    key: String,
    cached: Mutex<Option<String>>,
}

impl SessionIdentity {
    pub fn new(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cached: Mutex::new(None),
        }
    }

    /// Identity for the discovery demo key.
    pub fn discovery(store: Arc<dyn SessionStore>) -> Self {
        Self::new(store, DISCOVERY_SESSION_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored identifier, creating and persisting one on first use.
    pub fn get_or_create(&self) -> String {
        let mut cached = match self.cached.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }
        let id = get_or_create_session_id(self.store.as_ref(), &self.key);
        *cached = Some(id.clone());
        id
    }

    /// Replaces the stored identifier with a fresh one.
    pub fn reset(&self) -> String {
        let id = generate_session_id();
        if let Err(e) = self.store.save(&self.key, &id) {
            tracing::warn!(key = %self.key, error = %e, "Failed to persist regenerated session id");
        }
        let mut cached = match self.cached.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *cached = Some(id.clone());
        id
    }
}

/// Reads the identifier under `key`, generating and storing one when absent.
///
/// Never fails: if the store cannot be read, a fresh identifier is returned
/// without being persisted. If only the write fails, the generated
/// identifier is still returned.
pub fn get_or_create_session_id(store: &dyn SessionStore, key: &str) -> String {
    match store.load(key) {
        Ok(Some(existing)) if !existing.trim().is_empty() => existing,
        Ok(_) => {
            let id = generate_session_id();
            if let Err(e) = store.save(key, &id) {
                tracing::warn!(key, error = %e, "Session id not persisted; using in-memory id");
            }
            id
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Session store unavailable; using in-memory id");
            fallback_session_id()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StudioError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(StudioError::io("storage disabled"))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StudioError::io("storage disabled"))
        }
    }

    #[derive(Default)]
    struct ReadOnlyStore {
        saves: AtomicUsize,
    }

    impl SessionStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            Err(StudioError::io("quota exceeded"))
        }
    }

    #[test]
    fn test_creates_and_persists_on_first_use() {
        let store = MemorySessionStore::new();
        let id = get_or_create_session_id(&store, DISCOVERY_SESSION_KEY);
        assert!(!id.is_empty());
        assert_eq!(store.load(DISCOVERY_SESSION_KEY).unwrap(), Some(id.clone()));

        let again = get_or_create_session_id(&store, DISCOVERY_SESSION_KEY);
        assert_eq!(again, id);
    }

    #[test]
    fn test_reuses_existing_value() {
        let store = MemorySessionStore::new();
        store.save("sid", "already-here").unwrap();
        assert_eq!(get_or_create_session_id(&store, "sid"), "already-here");
    }

    #[test]
    fn test_blank_value_is_replaced() {
        let store = MemorySessionStore::new();
        store.save("sid", "  ").unwrap();
        let id = get_or_create_session_id(&store, "sid");
        assert!(!id.trim().is_empty());
        assert_eq!(store.load("sid").unwrap(), Some(id));
    }

    #[test]
    fn test_storage_failure_never_propagates() {
        let first = get_or_create_session_id(&BrokenStore, "sid");
        let second = get_or_create_session_id(&BrokenStore, "sid");
        assert!(!first.is_empty());
        assert_ne!(first, second, "unpersisted ids are fresh on each call");
    }

    #[test]
    fn test_write_failure_still_returns_generated_id() {
        let store = ReadOnlyStore::default();
        let id = get_or_create_session_id(&store, "sid");
        assert!(!id.is_empty());
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_identity_caches_value() {
        let identity = SessionIdentity::new(Arc::new(BrokenStore), "sid");
        let first = identity.get_or_create();
        assert_eq!(identity.get_or_create(), first);
    }

    #[test]
    fn test_identity_reset_persists_new_value() {
        let store = Arc::new(MemorySessionStore::new());
        let identity = SessionIdentity::discovery(store.clone());
        let original = identity.get_or_create();
        let replaced = identity.reset();

        assert_ne!(original, replaced);
        assert_eq!(identity.get_or_create(), replaced);
        assert_eq!(store.load(DISCOVERY_SESSION_KEY).unwrap(), Some(replaced));
    }
}
