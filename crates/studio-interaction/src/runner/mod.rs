//! Orchestration of demo runs against the remote backends.

mod discovery;
mod estimate;
mod pipeline;
mod recorder;

pub use discovery::DiscoveryRunner;
pub use estimate::{ESTIMATE_REQUEST_FAILED, EstimateService, PRICING_LOAD_FAILED};
pub use pipeline::{CHANNEL_CLOSED_EARLY, PipelineRunner};
