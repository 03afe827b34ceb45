use serde::Serialize;

use super::RunStage;

/// Progress notifications published while a run advances.
///
/// Observers receive these in exactly the order the controller applied them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// The controller moved to a new stage.
    StageChanged { stage: RunStage },
    /// A step label was revealed (`index` is zero based).
    Step { index: usize, label: String },
    /// A line was appended to the run log.
    Log { line: String },
    /// Rows of generated input data became available.
    Preview { rows: Vec<String> },
    /// The run finished and its result is recorded.
    Completed { elapsed_ms: u64 },
    /// The run failed with a user-facing message.
    Failed { message: String },
}
