//! Ownership of the one live push channel.

use studio_core::Result;

use super::{PushChannel, PushEvent};

/// Holds at most one open channel.
///
/// Installing a channel closes the previous one first, and dropping the
/// slot closes whatever is still open.
#[derive(Default)]
pub struct ChannelSlot {
    current: Option<Box<dyn PushChannel>>,
}

impl ChannelSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.as_ref().is_some_and(|c| !c.is_closed())
    }

    /// Closes the current channel, if any. Returns true when one was closed.
    pub fn close(&mut self) -> bool {
        match self.current.take() {
            Some(mut channel) => {
                if !channel.is_closed() {
                    channel.close();
                }
                true
            }
            None => false,
        }
    }

    /// Closes the previous channel, then installs `channel`.
    pub fn replace(&mut self, channel: Box<dyn PushChannel>) {
        if self.close() {
            tracing::debug!("closed previous push channel before replacing it");
        }
        self.current = Some(channel);
    }

    /// Next event of the current channel; `None` when no channel is open.
    pub async fn next_event(&mut self) -> Option<Result<PushEvent>> {
        match self.current.as_mut() {
            Some(channel) => channel.next_event().await,
            None => None,
        }
    }
}

impl Drop for ChannelSlot {
    fn drop(&mut self) {
        self.close();
    }
}
