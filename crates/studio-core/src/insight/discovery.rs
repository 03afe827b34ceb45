//! Interview insight categories returned by the discovery service.

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PainPoint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quote: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobToBeDone {
    #[serde(default, deserialize_with = "lenient::text")]
    pub functional_job: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub emotional_job: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Workaround {
    #[serde(default, deserialize_with = "lenient::text")]
    pub what_they_do: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub why_needed: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cost: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DesiredOutcome {
    #[serde(default, deserialize_with = "lenient::text")]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub current_gap: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BehavioralSignal {
    #[serde(default, deserialize_with = "lenient::text")]
    pub observation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub what_it_reveals: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MentalModel {
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub metaphor_or_analogy: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub mismatch_with_reality: Option<String>,
}

/// Parsed view of a discovery result.
///
/// Each category is decoded on its own; a malformed category or item is
/// dropped without affecting the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightReport {
    pub pain_points: Vec<PainPoint>,
    pub jobs_to_be_done: Vec<JobToBeDone>,
    pub workarounds: Vec<Workaround>,
    pub desired_outcomes: Vec<DesiredOutcome>,
    pub behavioral_signals: Vec<BehavioralSignal>,
    pub mental_models: Vec<MentalModel>,
}

impl InsightReport {
    pub fn from_value(value: &Value) -> Self {
        Self {
            pain_points: lenient::items(value.get("pain_points")),
            jobs_to_be_done: lenient::items(value.get("jobs_to_be_done")),
            workarounds: lenient::items(value.get("workarounds")),
            desired_outcomes: lenient::items(value.get("desired_outcomes")),
            behavioral_signals: lenient::items(value.get("behavioral_signals")),
            mental_models: lenient::items(value.get("mental_models")),
        }
    }

    pub fn total_items(&self) -> usize {
        self.pain_points.len()
            + self.jobs_to_be_done.len()
            + self.workarounds.len()
            + self.desired_outcomes.len()
            + self.behavioral_signals.len()
            + self.mental_models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }
}
