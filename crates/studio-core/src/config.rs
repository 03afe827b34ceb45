use serde::{Deserialize, Serialize};

pub const DEFAULT_DISCOVERY_API: &str = "http://127.0.0.1:8001";
pub const DEFAULT_INSIGHTS_API: &str = "http://127.0.0.1:8002/api";
pub const DEFAULT_COST_API: &str = "http://127.0.0.1:8000";
pub const DEFAULT_STEP_DELAY_MS: u64 = 220;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote endpoints and client behaviour, read from `config.toml`.
///
/// Every field is optional in the file; missing keys take the defaults above.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StudioConfig {
    /// Base URL of the discovery (interview insights) service.
    pub discovery_api: String,
    /// Base URL of the sentiment insights pipeline.
    pub insights_api: String,
    /// Base URL of the pricing / estimate service.
    pub cost_api: String,
    /// Pause between revealed step labels.
    pub step_delay_ms: u64,
    /// Number of log lines retained per run.
    pub log_capacity: usize,
    pub request_timeout_secs: u64,
    /// Directory holding `sanitized.txt` / `sensitive.txt` transcript previews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_dir: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            discovery_api: DEFAULT_DISCOVERY_API.to_string(),
            insights_api: DEFAULT_INSIGHTS_API.to_string(),
            cost_api: DEFAULT_COST_API.to_string(),
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            log_capacity: crate::run::DEFAULT_LOG_CAPACITY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            samples_dir: None,
        }
    }
}

/// Joins a base URL and a path without doubling or dropping the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
