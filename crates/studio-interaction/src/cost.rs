//! Client of the pricing / estimate service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use studio_core::Result;
use studio_core::config::join_url;
use studio_core::estimate::{EstimateBody, EstimateResp, PricingEntry, PricingTable};

use crate::http::{read_json, transport_error};

#[async_trait]
pub trait CostBackend: Send + Sync {
    /// `GET /pricing`
    async fn pricing(&self) -> Result<PricingTable>;

    /// `POST /estimate`
    async fn estimate(&self, body: &EstimateBody) -> Result<EstimateResp>;
}

#[derive(Clone)]
pub struct CostClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl CostClient {
    pub fn new(client: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CostBackend for CostClient {
    async fn pricing(&self) -> Result<PricingTable> {
        let response = self
            .client
            .get(join_url(&self.base_url, "pricing"))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        let entries: Vec<PricingEntry> = read_json(response).await?;
        tracing::debug!(entries = entries.len(), "pricing loaded");
        Ok(PricingTable::new(entries))
    }

    async fn estimate(&self, body: &EstimateBody) -> Result<EstimateResp> {
        let response = self
            .client
            .post(join_url(&self.base_url, "estimate"))
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}
