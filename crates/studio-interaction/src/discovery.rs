//! Client of the discovery demo service (single call with embedded steps).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_core::Variant;
use studio_core::config::join_url;
use studio_core::Result;

use crate::http::{read_json, transport_error};

/// Header carrying the client session identifier.
pub const SESSION_HEADER: &str = "x-demo-session";

/// Body of `POST /demo/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoResponse {
    pub run_id: String,
    /// Progress labels, in the order they should be revealed.
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub insights: Value,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub cached: bool,
}

/// The remote side of a discovery run.
#[async_trait]
pub trait DemoBackend: Send + Sync {
    async fn run_demo(&self, variant: Variant, session_id: &str) -> Result<DemoResponse>;
}

#[derive(Clone)]
pub struct DiscoveryClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl DiscoveryClient {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DemoBackend for DiscoveryClient {
    async fn run_demo(&self, variant: Variant, session_id: &str) -> Result<DemoResponse> {
        let url = join_url(&self.base_url, "demo/run");
        let variant = variant.to_string();
        tracing::debug!(url = %url, variant = %variant, "requesting discovery run");
        let response = self
            .client
            .post(&url)
            .query(&[("mode", "auto"), ("variant", variant.as_str())])
            .header(SESSION_HEADER, session_id)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}
