//! Remote side of the studio demos: reqwest clients for the discovery,
//! insights pipeline and cost services, the server-push channel, and the
//! runners that drive a [`studio_core::RunController`] through them.

pub mod cost;
pub mod discovery;
pub mod http;
pub mod pipeline;
pub mod push_channel;
pub mod runner;

pub use cost::{CostBackend, CostClient};
pub use discovery::{DemoBackend, DemoResponse, DiscoveryClient};
pub use pipeline::{InsightsBackend, PipelineClient, RawPreview};
pub use push_channel::{ChannelSlot, PushChannel, PushEvent, SseChannel};
pub use runner::{DiscoveryRunner, EstimateService, PipelineRunner};
