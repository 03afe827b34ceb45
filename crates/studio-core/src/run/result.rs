use serde_json::Value;

use crate::insight::{InsightReport, SentimentRecord, parse_sentiment_items};

/// Final payload of a run.
///
/// The raw JSON is kept next to the parsed view so the JSON panel shows
/// exactly what the service returned, including fields this crate ignores.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// Interview insights from the discovery service.
    Insights { report: InsightReport, raw: Value },
    /// Per-asset sentiment records from the insights pipeline.
    Sentiment {
        records: Vec<SentimentRecord>,
        raw: Value,
    },
}

impl RunResult {
    pub fn insights(raw: Value) -> Self {
        let report = InsightReport::from_value(&raw);
        RunResult::Insights { report, raw }
    }

    /// Builds a sentiment result from the `items` array of the insights response.
    pub fn sentiment(raw: Value) -> Self {
        let records = parse_sentiment_items(&raw);
        RunResult::Sentiment { records, raw }
    }

    pub fn raw(&self) -> &Value {
        match self {
            RunResult::Insights { raw, .. } | RunResult::Sentiment { raw, .. } => raw,
        }
    }

    /// Number of renderable items in the result.
    pub fn item_count(&self) -> usize {
        match self {
            RunResult::Insights { report, .. } => report.total_items(),
            RunResult::Sentiment { records, .. } => records.len(),
        }
    }
}
