//! Lifecycle stages of a demo run.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where a run currently is in its lifecycle.
///
/// ```text
/// Idle -> Initializing -> Ingesting -> Analyzing -> Complete
///              \______________\____________\-------> Error
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStage {
    /// Nothing has been started yet.
    #[default]
    Idle,
    /// Start requested, waiting for the service to issue a run id.
    Initializing,
    /// Run id known, input data is being prepared.
    Ingesting,
    /// Data ready, waiting for the analysis to finish.
    Analyzing,
    /// Result recorded.
    Complete,
    /// The run failed; a new one may be started.
    Error,
}

impl RunStage {
    /// True while a run is in flight.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            RunStage::Initializing | RunStage::Ingesting | RunStage::Analyzing
        )
    }

    /// True once the run can no longer progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStage::Complete | RunStage::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_and_terminal_are_disjoint() {
        for stage in [
            RunStage::Idle,
            RunStage::Initializing,
            RunStage::Ingesting,
            RunStage::Analyzing,
            RunStage::Complete,
            RunStage::Error,
        ] {
            assert!(!(stage.is_active() && stage.is_terminal()), "{stage}");
        }
        assert!(!RunStage::Idle.is_active());
        assert!(!RunStage::Idle.is_terminal());
    }
}
