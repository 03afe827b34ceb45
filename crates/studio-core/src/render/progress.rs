//! Step chips and the log panel text.

use crate::run::{LogBuffer, Run};

pub const DONE_CHIP: &str = "Done";
pub const EMPTY_LOG_TEXT: &str = "…waiting for next run";

/// Step labels in arrival order, followed by `Done` once the run has
/// stopped. Nothing at all before the first step.
pub fn step_chips(run: &Run) -> Vec<String> {
    if run.steps.is_empty() {
        return Vec::new();
    }
    let mut chips = run.steps.clone();
    if !run.stage.is_active() {
        chips.push(DONE_CHIP.to_string());
    }
    chips
}

pub fn log_text(logs: &LogBuffer) -> String {
    if logs.is_empty() {
        EMPTY_LOG_TEXT.to_string()
    } else {
        logs.to_text()
    }
}
