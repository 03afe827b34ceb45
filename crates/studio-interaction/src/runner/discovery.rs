//! Single-call discovery run with paced step reveal.

use std::time::Duration;

use studio_core::run::{RunController, RunEvent, RunResult, RunStage};
use studio_core::{Result, StudioError, Variant};
use tokio::sync::mpsc::UnboundedSender;

use super::recorder::Recorder;
use crate::discovery::DemoBackend;
use crate::http::status_text;

pub struct DiscoveryRunner<B> {
    backend: B,
    step_delay: Duration,
    events: Option<UnboundedSender<RunEvent>>,
}

impl<B: DemoBackend> DiscoveryRunner<B> {
    pub fn new(backend: B, step_delay: Duration) -> Self {
        Self {
            backend,
            step_delay,
            events: None,
        }
    }

    /// Publishes progress to `tx` while runs advance.
    pub fn with_events(mut self, tx: UnboundedSender<RunEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Starts a run for `variant` and drives it to `Complete` or `Error`.
    ///
    /// Remote failures are recorded on the controller and are not returned
    /// as errors; `Err` means the controller rejected an update.
    pub async fn run(
        &self,
        ctl: &mut RunController,
        variant: Variant,
        session_id: &str,
    ) -> Result<RunStage> {
        let ticket = ctl.start(Some(variant));
        let mut rec = Recorder::new(ctl, ticket, self.events.clone(), true);
        rec.stage_changed();

        rec.log(&format!("POST /demo/run?variant={variant}"))?;
        rec.log("auth: x-demo-session present")?;
        rec.log("load: selecting server-side transcript")?;

        let response = match self.backend.run_demo(variant, session_id).await {
            Ok(response) => response,
            Err(err) => {
                rec.log(&format!("error: {}", log_reason(&err)))?;
                rec.fail(err.user_message())?;
                return Ok(rec.stage());
            }
        };

        rec.created(&response.run_id)?;
        tracing::info!(run_id = %response.run_id, steps = response.steps.len(), cached = response.cached, "discovery run accepted");

        for label in &response.steps {
            rec.step(label)?;
            rec.log(&format!("step: {label}"))?;
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
        }
        rec.data_ready(response.steps.len())?;

        if response.cached {
            rec.cached()?;
            rec.log("cache: hit (served from /tmp)")?;
        }
        rec.log("done: insights ready")?;
        rec.complete(RunResult::insights(response.insights))?;
        Ok(rec.stage())
    }
}

/// Text after `error:` in the run log: the server detail, else the status
/// reason phrase.
fn log_reason(err: &StudioError) -> String {
    match err {
        StudioError::Http {
            detail: Some(detail),
            ..
        } if !detail.trim().is_empty() => detail.clone(),
        StudioError::Http { status, .. } => status_text(*status),
        StudioError::Network(message) => message.clone(),
        other => other.to_string(),
    }
}
