//! Per-page run state machine.

use std::time::{Duration, Instant};

use crate::error::{Result, StudioError};

use super::{LogBuffer, RunResult, RunStage, Variant};

/// Handle identifying one started run.
///
/// Every transition takes the ticket issued by [`RunController::start`];
/// updates carrying the ticket of a superseded run are rejected so late
/// responses cannot leak into the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Counters recorded while a run progresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Number of items reported when the data became ready.
    pub ingested_items: Option<usize>,
    /// Wall-clock time from start to completion.
    pub elapsed: Option<Duration>,
    /// The service served the result from its cache.
    pub cached: bool,
}

/// Snapshot of the current (or last) run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub run_id: Option<String>,
    pub variant: Option<Variant>,
    pub stage: RunStage,
    /// Progress labels in arrival order.
    pub steps: Vec<String>,
    pub logs: LogBuffer,
    /// Preview rows of the generated input data.
    pub preview: Option<Vec<String>>,
    pub result: Option<RunResult>,
    pub error: Option<String>,
    pub metrics: RunMetrics,
}

/// Tracks the lifecycle of one demo run at a time.
#[derive(Debug)]
pub struct RunController {
    run: Run,
    generation: u64,
    started_at: Option<Instant>,
    log_capacity: usize,
}

impl Default for RunController {
    fn default() -> Self {
        Self::new(super::DEFAULT_LOG_CAPACITY)
    }
}

impl RunController {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            run: Run {
                logs: LogBuffer::with_capacity(log_capacity),
                ..Run::default()
            },
            generation: 0,
            started_at: None,
            log_capacity,
        }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn stage(&self) -> RunStage {
        self.run.stage
    }

    /// True when `ticket` belongs to the run currently tracked.
    pub fn is_current(&self, ticket: RunTicket) -> bool {
        ticket.0 == self.generation && self.generation > 0
    }

    /// Starts a new run, discarding all data of the previous one.
    ///
    /// Allowed from any stage. Callers owning resources of the previous run
    /// (an open push channel) must release them before calling this.
    pub fn start(&mut self, variant: Option<Variant>) -> RunTicket {
        if self.run.stage.is_active() {
            tracing::info!(
                run_id = ?self.run.run_id,
                stage = %self.run.stage,
                "Superseding active run"
            );
        }
        self.generation += 1;
        self.run = Run {
            variant,
            stage: RunStage::Initializing,
            logs: LogBuffer::with_capacity(self.log_capacity),
            ..Run::default()
        };
        self.started_at = Some(Instant::now());
        RunTicket(self.generation)
    }

    /// `Initializing -> Ingesting`: the service issued a run id.
    pub fn run_created(&mut self, ticket: RunTicket, run_id: impl Into<String>) -> Result<()> {
        self.expect(ticket, &[RunStage::Initializing], "run_created")?;
        let run_id = run_id.into();
        tracing::debug!(run_id = %run_id, "Run created");
        self.run.run_id = Some(run_id);
        self.run.stage = RunStage::Ingesting;
        Ok(())
    }

    /// `Ingesting -> Analyzing`: input data is ready.
    pub fn data_ready(&mut self, ticket: RunTicket, items: usize) -> Result<()> {
        self.expect(ticket, &[RunStage::Ingesting], "data_ready")?;
        self.run.metrics.ingested_items = Some(items);
        self.run.stage = RunStage::Analyzing;
        Ok(())
    }

    /// `Analyzing -> Complete`: records the result and elapsed time.
    pub fn complete(&mut self, ticket: RunTicket, result: RunResult) -> Result<Duration> {
        self.expect(ticket, &[RunStage::Analyzing], "complete")?;
        let elapsed = self
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or_default();
        self.run.result = Some(result);
        self.run.metrics.elapsed = Some(elapsed);
        self.run.stage = RunStage::Complete;
        tracing::info!(
            run_id = ?self.run.run_id,
            elapsed_ms = elapsed.as_millis() as u64,
            "Run complete"
        );
        Ok(elapsed)
    }

    /// Any non-idle stage `-> Error`.
    pub fn fail(&mut self, ticket: RunTicket, message: impl Into<String>) -> Result<()> {
        self.ensure_current(ticket, "fail")?;
        if self.run.stage == RunStage::Idle {
            return Err(StudioError::invalid_state("cannot fail a run that was never started"));
        }
        let message = message.into();
        tracing::warn!(run_id = ?self.run.run_id, stage = %self.run.stage, error = %message, "Run failed");
        self.run.error = Some(message);
        self.run.stage = RunStage::Error;
        Ok(())
    }

    /// Appends a progress label; only while the run is active.
    pub fn push_step(&mut self, ticket: RunTicket, label: impl Into<String>) -> Result<usize> {
        self.expect(
            ticket,
            &[RunStage::Initializing, RunStage::Ingesting, RunStage::Analyzing],
            "push_step",
        )?;
        self.run.steps.push(label.into());
        Ok(self.run.steps.len() - 1)
    }

    /// Appends a log line verbatim.
    pub fn push_log(&mut self, ticket: RunTicket, line: impl Into<String>) -> Result<()> {
        self.ensure_current(ticket, "push_log")?;
        self.run.logs.push(line);
        Ok(())
    }

    /// Appends a log line stamped with the current time; returns the stored line.
    pub fn push_log_stamped(&mut self, ticket: RunTicket, line: &str) -> Result<String> {
        self.ensure_current(ticket, "push_log")?;
        self.run.logs.push_now(line);
        Ok(self.run.logs.last().unwrap_or_default().to_string())
    }

    pub fn set_preview(&mut self, ticket: RunTicket, rows: Vec<String>) -> Result<()> {
        self.ensure_current(ticket, "set_preview")?;
        self.run.preview = Some(rows);
        Ok(())
    }

    pub fn mark_cached(&mut self, ticket: RunTicket) -> Result<()> {
        self.ensure_current(ticket, "mark_cached")?;
        self.run.metrics.cached = true;
        Ok(())
    }

    fn ensure_current(&self, ticket: RunTicket, action: &str) -> Result<()> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(StudioError::invalid_state(format!(
                "{action}: run {} was superseded by run {}",
                ticket.0, self.generation
            )))
        }
    }

    fn expect(&self, ticket: RunTicket, allowed: &[RunStage], action: &str) -> Result<()> {
        self.ensure_current(ticket, action)?;
        if allowed.contains(&self.run.stage) {
            Ok(())
        } else {
            Err(StudioError::invalid_state(format!(
                "{action} not allowed in stage {}",
                self.run.stage
            )))
        }
    }
}
