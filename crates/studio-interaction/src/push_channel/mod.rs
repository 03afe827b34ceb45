//! Server-push channel: a single-subscriber stream of log lines and named
//! events for one run.

mod parser;
mod slot;
mod sse;

use async_trait::async_trait;
use studio_core::Result;

pub use parser::SseParser;
pub use slot::ChannelSlot;
pub use sse::SseChannel;

/// Name of the event carrying the pipeline status.
pub const STATUS_EVENT: &str = "status";
/// Status value that ends a run successfully.
pub const STATUS_DONE: &str = "done";

/// One decoded push event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// Unlabeled data, one log line.
    Message(String),
    /// A labeled event such as `status`.
    Named { event: String, data: String },
}

impl PushEvent {
    pub fn is_status(&self) -> bool {
        matches!(self, PushEvent::Named { event, .. } if event == STATUS_EVENT)
    }
}

/// An open subscription.
///
/// `next_event` yields events in arrival order and `None` once the stream
/// has ended or was closed. `close` releases the connection; calling it
/// more than once has no further effect.
#[async_trait]
pub trait PushChannel: Send {
    async fn next_event(&mut self) -> Option<Result<PushEvent>>;

    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
