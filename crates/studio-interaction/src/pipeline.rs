//! Client of the insights pipeline (start, mock data, push channel, results).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use studio_core::Result;
use studio_core::config::join_url;

use crate::http::{expect_success, read_json, transport_error};
use crate::push_channel::{PushChannel, SseChannel};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartResponse {
    pub run_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPreview {
    #[serde(default)]
    pub rows: Option<Vec<String>>,
}

/// The remote side of a pipeline run.
#[async_trait]
pub trait InsightsBackend: Send + Sync {
    /// `POST /demo/start`
    async fn start(&self) -> Result<String>;

    /// `POST /demo/mockgen?run_id=`
    async fn mockgen(&self, run_id: &str) -> Result<()>;

    /// `GET /demo/raw?run_id=`
    async fn raw(&self, run_id: &str) -> Result<RawPreview>;

    /// `GET /demo/stream?run_id=`
    async fn open_stream(&self, run_id: &str) -> Result<Box<dyn PushChannel>>;

    /// `GET /demo/insights?run_id=`, returning the `items` array.
    async fn insights(&self, run_id: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct PipelineClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PipelineClient {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[derive(Deserialize)]
struct InsightsResponse {
    #[serde(default)]
    items: Value,
}

#[async_trait]
impl InsightsBackend for PipelineClient {
    async fn start(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("demo/start"))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let started: StartResponse = read_json(response).await?;
        tracing::info!(run_id = %started.run_id, "pipeline run started");
        Ok(started.run_id)
    }

    async fn mockgen(&self, run_id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("demo/mockgen"))
            .query(&[("run_id", run_id)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        expect_success(response).await
    }

    async fn raw(&self, run_id: &str) -> Result<RawPreview> {
        let response = self
            .client
            .get(self.url("demo/raw"))
            .query(&[("run_id", run_id)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn open_stream(&self, run_id: &str) -> Result<Box<dyn PushChannel>> {
        let url = reqwest::Url::parse_with_params(&self.url("demo/stream"), &[("run_id", run_id)])
            .map_err(|e| studio_core::StudioError::config(format!("Invalid insights URL: {e}")))?;
        let channel = SseChannel::open(&self.client, url.as_str()).await?;
        tracing::debug!(run_id, "push channel opened");
        Ok(Box::new(channel))
    }

    async fn insights(&self, run_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.url("demo/insights"))
            .query(&[("run_id", run_id)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let body: InsightsResponse = read_json(response).await?;
        Ok(body.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_preview_rows_optional() {
        let raw: RawPreview = serde_json::from_value(json!({})).unwrap();
        assert!(raw.rows.is_none());
        let raw: RawPreview = serde_json::from_value(json!({"rows": ["a,b", "1,2"]})).unwrap();
        assert_eq!(raw.rows.unwrap().len(), 2);
    }

    #[test]
    fn test_url_join() {
        let client = PipelineClient::new(Client::new(), "http://localhost:9000/api/", Duration::from_secs(1));
        assert_eq!(client.url("demo/start"), "http://localhost:9000/api/demo/start");
    }
}
