//! Demo run lifecycle: stages, log buffer, controller and events.

mod controller;
mod event;
mod log_buffer;
mod result;
mod stage;
mod variant;

pub use controller::{Run, RunController, RunMetrics, RunTicket};
pub use event::RunEvent;
pub use log_buffer::{DEFAULT_LOG_CAPACITY, LogBuffer};
pub use result::RunResult;
pub use stage::RunStage;
pub use variant::Variant;
