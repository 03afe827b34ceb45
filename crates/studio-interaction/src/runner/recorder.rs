use studio_core::run::{RunController, RunEvent, RunResult, RunStage, RunTicket};
use studio_core::{Result, StudioError};
use tokio::sync::mpsc::UnboundedSender;

/// Applies run updates to the controller and mirrors each one as a
/// [`RunEvent`] to an optional observer, in the same order.
pub(crate) struct Recorder<'a> {
    ctl: &'a mut RunController,
    ticket: RunTicket,
    events: Option<UnboundedSender<RunEvent>>,
    stamped: bool,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(
        ctl: &'a mut RunController,
        ticket: RunTicket,
        events: Option<UnboundedSender<RunEvent>>,
        stamped: bool,
    ) -> Self {
        Self {
            ctl,
            ticket,
            events,
            stamped,
        }
    }

    fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.events {
            // A gone observer does not stop the run.
            let _ = tx.send(event);
        }
    }

    pub(crate) fn stage_changed(&self) {
        self.emit(RunEvent::StageChanged {
            stage: self.ctl.stage(),
        });
    }

    pub(crate) fn stage(&self) -> RunStage {
        self.ctl.stage()
    }

    /// Id of the run this recorder writes to; fails once the run was superseded.
    pub(crate) fn run_id(&self) -> Result<String> {
        if !self.ctl.is_current(self.ticket) {
            return Err(StudioError::invalid_state("run was superseded"));
        }
        self.ctl
            .run()
            .run_id
            .clone()
            .ok_or_else(|| StudioError::invalid_state("run has no id yet"))
    }

    pub(crate) fn log(&mut self, line: &str) -> Result<()> {
        let stored = if self.stamped {
            self.ctl.push_log_stamped(self.ticket, line)?
        } else {
            self.ctl.push_log(self.ticket, line)?;
            line.to_string()
        };
        self.emit(RunEvent::Log { line: stored });
        Ok(())
    }

    pub(crate) fn created(&mut self, run_id: &str) -> Result<()> {
        self.ctl.run_created(self.ticket, run_id)?;
        self.stage_changed();
        Ok(())
    }

    pub(crate) fn step(&mut self, label: &str) -> Result<()> {
        let index = self.ctl.push_step(self.ticket, label)?;
        self.emit(RunEvent::Step {
            index,
            label: label.to_string(),
        });
        Ok(())
    }

    pub(crate) fn preview(&mut self, rows: Vec<String>) -> Result<()> {
        self.ctl.set_preview(self.ticket, rows.clone())?;
        self.emit(RunEvent::Preview { rows });
        Ok(())
    }

    pub(crate) fn data_ready(&mut self, items: usize) -> Result<()> {
        self.ctl.data_ready(self.ticket, items)?;
        self.stage_changed();
        Ok(())
    }

    pub(crate) fn cached(&mut self) -> Result<()> {
        self.ctl.mark_cached(self.ticket)
    }

    pub(crate) fn complete(&mut self, result: RunResult) -> Result<()> {
        let elapsed = self.ctl.complete(self.ticket, result)?;
        self.stage_changed();
        self.emit(RunEvent::Completed {
            elapsed_ms: elapsed.as_millis() as u64,
        });
        Ok(())
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.ctl.fail(self.ticket, message.clone())?;
        self.stage_changed();
        self.emit(RunEvent::Failed { message });
        Ok(())
    }
}
