//! Everything a command needs: effective configuration, file locations and
//! the shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use studio_core::identity::SessionIdentity;
use studio_core::{Result, StudioConfig};
use studio_infrastructure::config_service::apply_env_overrides;
use studio_infrastructure::{ConfigService, FileSessionStore, SampleLibrary, StudioPaths};
use studio_interaction::http::build_client;
use studio_interaction::{CostClient, DiscoveryClient, PipelineClient};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URL overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct EndpointOverrides {
    pub discovery_api: Option<String>,
    pub insights_api: Option<String>,
    pub cost_api: Option<String>,
}

impl EndpointOverrides {
    fn apply(&self, config: &mut StudioConfig) {
        let targets = [
            (&self.discovery_api, &mut config.discovery_api),
            (&self.insights_api, &mut config.insights_api),
            (&self.cost_api, &mut config.cost_api),
        ];
        for (value, slot) in targets {
            if let Some(url) = value.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
                *slot = url.to_string();
            }
        }
    }
}

/// An unreadable config file falls back to defaults; `env` and flags still apply.
fn effective_config(
    service: &ConfigService,
    overrides: &EndpointOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> StudioConfig {
    let mut config = service.get_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        let mut config = StudioConfig::default();
        apply_env_overrides(&mut config, env);
        config
    });
    overrides.apply(&mut config);
    config
}

pub struct AppContext {
    pub config: StudioConfig,
    pub paths: StudioPaths,
    client: Client,
}

impl AppContext {
    /// Config file, then environment, then command-line flags.
    pub fn load(paths: StudioPaths, overrides: &EndpointOverrides) -> Result<Self> {
        let service = ConfigService::new(paths.clone());
        let config = effective_config(&service, overrides, |name| std::env::var(name).ok());
        tracing::debug!(?config, "effective configuration");

        Ok(Self {
            config,
            paths,
            client: build_client(CONNECT_TIMEOUT)?,
        })
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.config.step_delay_ms)
    }

    pub fn discovery_client(&self) -> DiscoveryClient {
        DiscoveryClient::new(
            self.client.clone(),
            self.config.discovery_api.clone(),
            self.request_timeout(),
        )
    }

    pub fn pipeline_client(&self) -> PipelineClient {
        PipelineClient::new(
            self.client.clone(),
            self.config.insights_api.clone(),
            self.request_timeout(),
        )
    }

    pub fn cost_client(&self) -> CostClient {
        CostClient::new(
            self.client.clone(),
            self.config.cost_api.clone(),
            self.request_timeout(),
        )
    }

    pub fn session_identity(&self) -> SessionIdentity {
        let store = FileSessionStore::new(self.paths.state_file());
        SessionIdentity::discovery(Arc::new(store))
    }

    pub fn samples(&self) -> SampleLibrary {
        match &self.config.samples_dir {
            Some(dir) => SampleLibrary::new(dir),
            None => SampleLibrary::new(self.paths.samples_dir()),
        }
    }
}
