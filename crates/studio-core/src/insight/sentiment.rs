//! Per-asset sentiment records produced by the insights pipeline.

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentimentInsight {
    #[serde(default, deserialize_with = "lenient::text")]
    pub tone: Option<String>,
    /// Confidence in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient::number")]
    pub confidence: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub drivers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub risks: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SentimentRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub asset_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(default)]
    pub insight: Option<SentimentInsight>,
}

impl SentimentInsight {
    /// Confidence as a whole percentage, rounded half away from zero.
    pub fn confidence_percent(&self) -> Option<i64> {
        self.confidence.map(|c| (c * 100.0).round() as i64)
    }
}

/// Decodes the `items` array of an insights response.
pub fn parse_sentiment_items(value: &Value) -> Vec<SentimentRecord> {
    lenient::items(Some(value))
}
