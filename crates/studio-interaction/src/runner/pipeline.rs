//! Multi-call pipeline run: start, generate, subscribe, fetch results.

use studio_core::run::{RunController, RunEvent, RunResult, RunStage, RunTicket};
use studio_core::{Result, StudioError};
use tokio::sync::mpsc::UnboundedSender;

use super::recorder::Recorder;
use crate::pipeline::InsightsBackend;
use crate::push_channel::{ChannelSlot, PushEvent, STATUS_DONE};

/// Failure text when the stream ends without a status event.
pub const CHANNEL_CLOSED_EARLY: &str = "push channel closed before completion";

/// Drives pipeline runs and owns the single live push channel.
///
/// Each phase is exposed separately so a front end can trigger them one
/// at a time; [`PipelineRunner::run_all`] chains them.
pub struct PipelineRunner<B> {
    backend: B,
    slot: ChannelSlot,
    events: Option<UnboundedSender<RunEvent>>,
}

impl<B: InsightsBackend> PipelineRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slot: ChannelSlot::new(),
            events: None,
        }
    }

    pub fn with_events(mut self, tx: UnboundedSender<RunEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn has_open_channel(&self) -> bool {
        self.slot.is_open()
    }

    fn recorder<'a>(&self, ctl: &'a mut RunController, ticket: RunTicket) -> Recorder<'a> {
        Recorder::new(ctl, ticket, self.events.clone(), false)
    }

    /// Closes any channel of the previous run, then starts a new run.
    pub async fn start(&mut self, ctl: &mut RunController) -> Result<RunTicket> {
        self.slot.close();
        let ticket = ctl.start(None);
        let mut rec = self.recorder(ctl, ticket);
        rec.stage_changed();
        match self.backend.start().await {
            Ok(run_id) => rec.created(&run_id)?,
            Err(err) => return Err(record_failure(&mut rec, err)),
        }
        Ok(ticket)
    }

    /// Generates mock input for the run and loads its preview.
    pub async fn generate(&mut self, ctl: &mut RunController, ticket: RunTicket) -> Result<()> {
        let mut rec = self.recorder(ctl, ticket);
        let run_id = rec.run_id()?;

        if let Err(err) = self.backend.mockgen(&run_id).await {
            return Err(record_failure(&mut rec, err));
        }
        let rows = match self.backend.raw(&run_id).await {
            Ok(raw) => raw.rows.unwrap_or_default(),
            Err(err) => return Err(record_failure(&mut rec, err)),
        };
        let count = rows.len();
        rec.preview(rows)?;
        rec.data_ready(count)
    }

    /// Subscribes to the run's push channel, replacing any open one.
    pub async fn open_stream(&mut self, ctl: &mut RunController, ticket: RunTicket) -> Result<()> {
        self.slot.close();
        let mut rec = self.recorder(ctl, ticket);
        let run_id = rec.run_id()?;
        match self.backend.open_stream(&run_id).await {
            Ok(channel) => {
                self.slot.replace(channel);
                Ok(())
            }
            Err(err) => Err(record_failure(&mut rec, err)),
        }
    }

    /// Consumes push events until a status event arrives or the stream ends.
    ///
    /// Unlabeled events become log lines. Any status event is logged as
    /// `STATUS: <value>` and closes the channel; `done` then fetches the
    /// results, other values fail the run.
    pub async fn pump(&mut self, ctl: &mut RunController, ticket: RunTicket) -> Result<RunStage> {
        let events = self.events.clone();
        let mut rec = Recorder::new(ctl, ticket, events, false);
        let run_id = rec.run_id()?;

        loop {
            match self.slot.next_event().await {
                Some(Ok(PushEvent::Message(line))) => rec.log(&line)?,
                Some(Ok(event)) if event.is_status() => {
                    let PushEvent::Named { data: status, .. } = event else {
                        continue;
                    };
                    rec.log(&format!("STATUS: {status}"))?;
                    self.slot.close();
                    if status == STATUS_DONE {
                        match self.backend.insights(&run_id).await {
                            Ok(items) => rec.complete(RunResult::sentiment(items))?,
                            Err(err) => return Err(record_failure(&mut rec, err)),
                        }
                    } else {
                        rec.fail(format!("pipeline finished with status: {status}"))?;
                    }
                    return Ok(rec.stage());
                }
                Some(Ok(PushEvent::Named { event, .. })) => {
                    tracing::debug!(run_id = %run_id, event = %event, "ignoring push event");
                }
                Some(Err(err)) => {
                    self.slot.close();
                    return Err(record_failure(&mut rec, err));
                }
                None => {
                    self.slot.close();
                    rec.fail(CHANNEL_CLOSED_EARLY)?;
                    return Ok(rec.stage());
                }
            }
        }
    }

    /// Runs every phase in order. Remote failures end in `RunStage::Error`
    /// and are not returned as errors.
    pub async fn run_all(&mut self, ctl: &mut RunController) -> Result<RunStage> {
        let phases = async {
            let ticket = self.start(ctl).await?;
            self.generate(ctl, ticket).await?;
            self.open_stream(ctl, ticket).await?;
            self.pump(ctl, ticket).await
        };
        match phases.await {
            Ok(stage) => Ok(stage),
            Err(err) if is_remote(&err) => Ok(ctl.stage()),
            Err(err) => Err(err),
        }
    }

    /// Closes the open channel, if any.
    pub fn shutdown(&mut self) {
        self.slot.close();
    }
}

fn is_remote(err: &StudioError) -> bool {
    err.is_network() || err.is_http() || matches!(err, StudioError::Serialization { .. })
}

/// Records `err` on the run and hands it back for propagation.
fn record_failure(rec: &mut Recorder<'_>, err: StudioError) -> StudioError {
    if let Err(state) = rec.fail(err.user_message()) {
        tracing::warn!(error = %state, "could not record failure on run");
    }
    err
}
