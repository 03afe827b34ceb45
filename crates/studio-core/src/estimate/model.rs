//! Wire types of the pricing / estimate service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Model vendor whose prices the estimator knows about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
    Meta,
    Mistral,
}

/// One row of `GET /pricing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub provider: Provider,
    pub model: String,
    /// Price per 1k input tokens.
    pub input_per_1k: f64,
    /// Price per 1k output tokens.
    pub output_per_1k: f64,
    pub latency_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Body of `POST /estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateBody {
    pub provider: Provider,
    pub model: String,
    pub requests_per_day: f64,
    pub avg_input_tokens: f64,
    pub avg_output_tokens: f64,
    /// Share of requests served from cache, in `[0, 1]`.
    pub cache_hit_rate: f64,
    pub streaming: bool,
}

impl Default for EstimateBody {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            model: "gpt-4o-mini".to_string(),
            requests_per_day: 1000.0,
            avg_input_tokens: 200.0,
            avg_output_tokens: 300.0,
            cache_hit_rate: 0.0,
            streaming: false,
        }
    }
}

/// Response of `POST /estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResp {
    pub cost_per_request: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
    pub tokens_in_per_req: f64,
    pub tokens_out_per_req: f64,
}

impl EstimateResp {
    /// True when every figure is a finite, non-negative number.
    pub fn is_well_formed(&self) -> bool {
        [
            self.cost_per_request,
            self.daily_cost,
            self.monthly_cost,
            self.yearly_cost,
            self.tokens_in_per_req,
            self.tokens_out_per_req,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_wire_names() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(serde_json::to_value(Provider::Mistral).unwrap(), json!("mistral"));
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Anthropic);
    }

    #[test]
    fn test_default_body_serializes_like_the_form() {
        let body = serde_json::to_value(EstimateBody::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "provider": "openai",
                "model": "gpt-4o-mini",
                "requests_per_day": 1000.0,
                "avg_input_tokens": 200.0,
                "avg_output_tokens": 300.0,
                "cache_hit_rate": 0.0,
                "streaming": false
            })
        );
    }

    #[test]
    fn test_pricing_entry_currency_is_optional() {
        let entry: PricingEntry = serde_json::from_value(json!({
            "provider": "meta",
            "model": "llama-3.1-70b",
            "input_per_1k": 0.0005,
            "output_per_1k": 0.0008,
            "latency_ms": 900
        }))
        .unwrap();
        assert_eq!(entry.currency, None);
        assert_eq!(entry.provider, Provider::Meta);
    }

    #[test]
    fn test_response_sanity() {
        let resp: EstimateResp = serde_json::from_value(json!({
            "cost_per_request": 0.01,
            "daily_cost": 10,
            "monthly_cost": 300,
            "yearly_cost": 3650,
            "tokens_in_per_req": 200,
            "tokens_out_per_req": 300
        }))
        .unwrap();
        assert!(resp.is_well_formed());
        let negative = EstimateResp { daily_cost: -1.0, ..resp };
        assert!(!negative.is_well_formed());
    }
}
