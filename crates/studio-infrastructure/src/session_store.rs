//! File-backed session identifier storage.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use studio_core::Result;
use studio_core::identity::SessionStore;

use crate::storage::AtomicTomlFile;

/// Persisted client state (`state.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientState {
    /// Session identifiers by storage key.
    #[serde(default)]
    pub sessions: BTreeMap<String, String>,
}

/// [`SessionStore`] over a TOML file, safe across concurrent processes.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file: AtomicTomlFile<ClientState>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let state = self.file.load()?.unwrap_or_default();
        Ok(state.sessions.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.file.update(ClientState::default(), |state| {
            state.sessions.insert(key.to_string(), value.to_string());
        })?;
        tracing::debug!(key, path = %self.file.path().display(), "persisted session id");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use studio_core::SessionIdentity;
    use studio_core::identity::DISCOVERY_SESSION_KEY;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("state.toml"));
        store.save("a", "one").unwrap();
        store.save("b", "two").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("one"));
        assert_eq!(store.load("b").unwrap().as_deref(), Some("two"));
        assert_eq!(store.load("c").unwrap(), None);
    }

    #[test]
    fn test_identity_is_stable_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.toml");

        let first = SessionIdentity::discovery(Arc::new(FileSessionStore::new(path.clone())))
            .get_or_create();
        let second = SessionIdentity::discovery(Arc::new(FileSessionStore::new(path.clone())))
            .get_or_create();
        assert_eq!(first, second);

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains(DISCOVERY_SESSION_KEY));
    }

    #[test]
    fn test_corrupt_file_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "sessions = 3").unwrap();
        let store = FileSessionStore::new(path);
        assert!(store.load("a").is_err());
    }
}
