//! Configuration service.
//!
//! Loads [`StudioConfig`] from `config.toml`, then applies environment
//! overrides. The result is cached until [`ConfigService::invalidate_cache`].

use std::sync::{Arc, RwLock};

use studio_core::{Result, StudioConfig};

use crate::paths::StudioPaths;
use crate::storage::AtomicTomlFile;

/// Environment variable overriding the discovery service base URL.
pub const ENV_DISCOVERY_API: &str = "DISCOVERY_API";
/// Environment variable overriding the insights pipeline base URL.
pub const ENV_INSIGHTS_API: &str = "INSIGHTS_API";
/// Environment variable overriding the pricing / estimate base URL.
pub const ENV_COST_API: &str = "COST_API_BASE";

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: StudioPaths,
    config: Arc<RwLock<Option<StudioConfig>>>,
}

impl ConfigService {
    pub fn new(paths: StudioPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn paths(&self) -> &StudioPaths {
        &self.paths
    }

    /// Returns the effective configuration, reading the file on first use.
    pub fn get_config(&self) -> Result<StudioConfig> {
        if let Ok(guard) = self.config.read() {
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_file()?;
        apply_env_overrides(&mut loaded, |name| std::env::var(name).ok());

        match self.config.write() {
            Ok(mut guard) => *guard = Some(loaded.clone()),
            Err(poisoned) => *poisoned.into_inner() = Some(loaded.clone()),
        }
        Ok(loaded)
    }

    pub fn invalidate_cache(&self) {
        match self.config.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Writes `config` to `config.toml` and refreshes the cache.
    pub fn save(&self, config: &StudioConfig) -> Result<()> {
        AtomicTomlFile::new(self.paths.config_file()).save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    fn load_file(&self) -> Result<StudioConfig> {
        let path = self.paths.config_file();
        let file = AtomicTomlFile::<StudioConfig>::new(path.clone());
        match file.load()? {
            Some(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Ok(config)
            }
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(StudioConfig::default())
            }
        }
    }
}

/// Replaces base URLs with non-blank values returned by `lookup`.
pub fn apply_env_overrides(config: &mut StudioConfig, lookup: impl Fn(&str) -> Option<String>) {
    let targets = [
        (ENV_DISCOVERY_API, &mut config.discovery_api),
        (ENV_INSIGHTS_API, &mut config.insights_api),
        (ENV_COST_API, &mut config.cost_api),
    ];
    for (name, field) in targets {
        if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(env = name, value = %value, "config override from environment");
            *field = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::config::{DEFAULT_COST_API, DEFAULT_STEP_DELAY_MS};
    use tempfile::TempDir;

    #[test]
    fn test_env_overrides() {
        let mut config = StudioConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            ENV_COST_API => Some("https://cost.example".to_string()),
            ENV_DISCOVERY_API => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.cost_api, "https://cost.example");
        assert_eq!(config.discovery_api, StudioConfig::default().discovery_api);
    }

    #[test]
    fn test_file_values_and_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(StudioPaths::at(dir.path()));
        let file = service.load_file().unwrap();
        assert_eq!(file.cost_api, DEFAULT_COST_API);

        std::fs::write(dir.path().join("config.toml"), "step_delay_ms = 5\n").unwrap();
        let file = service.load_file().unwrap();
        assert_eq!(file.step_delay_ms, 5);
        assert_ne!(file.step_delay_ms, DEFAULT_STEP_DELAY_MS);
    }

    #[test]
    fn test_save_invalidates_cache() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(StudioPaths::at(dir.path()));
        let mut config = service.get_config().unwrap();
        config.log_capacity = 50;
        service.save(&config).unwrap();
        assert_eq!(service.get_config().unwrap().log_capacity, 50);
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "step_delay_ms = \"x\"").unwrap();
        let service = ConfigService::new(StudioPaths::at(dir.path()));
        assert!(service.get_config().is_err());
    }
}
