use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use studio_core::run::{RunController, RunResult, RunStage};
use studio_core::{Result, StudioError};
use studio_interaction::runner::CHANNEL_CLOSED_EARLY;
use studio_interaction::{InsightsBackend, PipelineRunner, PushChannel, PushEvent, RawPreview};

type Journal = Arc<Mutex<Vec<String>>>;

fn note(journal: &Journal, entry: String) {
    journal.lock().unwrap().push(entry);
}

struct ScriptedChannel {
    run_id: String,
    events: VecDeque<Result<PushEvent>>,
    journal: Journal,
    closed: bool,
}

#[async_trait]
impl PushChannel for ScriptedChannel {
    async fn next_event(&mut self) -> Option<Result<PushEvent>> {
        if self.closed {
            return None;
        }
        self.events.pop_front()
    }

    fn close(&mut self) {
        note(&self.journal, format!("close:{}", self.run_id));
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

struct MockPipeline {
    runs: AtomicUsize,
    script: Vec<Result<PushEvent>>,
    start_error: Option<StudioError>,
    journal: Journal,
}

impl MockPipeline {
    fn new(script: Vec<Result<PushEvent>>) -> Self {
        Self {
            runs: AtomicUsize::new(0),
            script,
            start_error: None,
            journal: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

fn message(line: &str) -> Result<PushEvent> {
    Ok(PushEvent::Message(line.to_string()))
}

fn status(value: &str) -> Result<PushEvent> {
    Ok(PushEvent::Named {
        event: "status".to_string(),
        data: value.to_string(),
    })
}

#[async_trait]
impl InsightsBackend for MockPipeline {
    async fn start(&self) -> Result<String> {
        if let Some(err) = &self.start_error {
            return Err(err.clone());
        }
        let n = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("run-{n}"))
    }

    async fn mockgen(&self, run_id: &str) -> Result<()> {
        note(&self.journal, format!("mockgen:{run_id}"));
        Ok(())
    }

    async fn raw(&self, _run_id: &str) -> Result<RawPreview> {
        Ok(RawPreview {
            rows: Some(vec!["asset_id,date,text".into(), "AAPL,2024-05-01,beat".into()]),
        })
    }

    async fn open_stream(&self, run_id: &str) -> Result<Box<dyn PushChannel>> {
        note(&self.journal, format!("open:{run_id}"));
        Ok(Box::new(ScriptedChannel {
            run_id: run_id.to_string(),
            events: self.script.clone().into(),
            journal: Arc::clone(&self.journal),
            closed: false,
        }))
    }

    async fn insights(&self, run_id: &str) -> Result<Value> {
        note(&self.journal, format!("insights:{run_id}"));
        Ok(json!([{
            "asset_id": "AAPL",
            "date": "2024-05-01",
            "insight": {"tone": "positive", "confidence": 0.9}
        }]))
    }
}

fn journal_of(runner_backend: &Journal) -> Vec<String> {
    runner_backend.lock().unwrap().clone()
}

#[tokio::test]
async fn test_full_run_completes_with_sentiment() {
    let backend = MockPipeline::new(vec![
        message("ingest: 2 rows"),
        message("score: running"),
        status("done"),
        message("never read"),
    ]);
    let journal = Arc::clone(&backend.journal);
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let stage = runner.run_all(&mut ctl).await.unwrap();

    assert_eq!(stage, RunStage::Complete);
    let logs: Vec<&str> = ctl.run().logs.iter().collect();
    assert_eq!(logs, vec!["ingest: 2 rows", "score: running", "STATUS: done"]);
    assert_eq!(ctl.run().preview.as_ref().map(Vec::len), Some(2));
    assert_eq!(ctl.run().metrics.ingested_items, Some(2));
    match ctl.run().result.as_ref().unwrap() {
        RunResult::Sentiment { records, .. } => assert_eq!(records.len(), 1),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(!runner.has_open_channel());
    assert_eq!(
        journal_of(&journal),
        vec!["mockgen:run-1", "open:run-1", "close:run-1", "insights:run-1"]
    );
}

#[tokio::test]
async fn test_new_run_closes_open_channel_once_before_opening() {
    let backend = MockPipeline::new(vec![message("working")]);
    let journal = Arc::clone(&backend.journal);
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let first = runner.start(&mut ctl).await.unwrap();
    runner.generate(&mut ctl, first).await.unwrap();
    runner.open_stream(&mut ctl, first).await.unwrap();
    assert!(runner.has_open_channel());

    let second = runner.start(&mut ctl).await.unwrap();
    assert!(!runner.has_open_channel());
    runner.generate(&mut ctl, second).await.unwrap();
    runner.open_stream(&mut ctl, second).await.unwrap();

    // The superseded ticket can no longer touch the run.
    assert!(runner.generate(&mut ctl, first).await.is_err());

    drop(runner);
    assert_eq!(
        journal_of(&journal),
        vec![
            "mockgen:run-1",
            "open:run-1",
            "close:run-1",
            "mockgen:run-2",
            "open:run-2",
            "close:run-2",
        ]
    );
}

#[tokio::test]
async fn test_non_done_status_fails_run() {
    let backend = MockPipeline::new(vec![message("step 1"), status("failed")]);
    let journal = Arc::clone(&backend.journal);
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let stage = runner.run_all(&mut ctl).await.unwrap();

    assert_eq!(stage, RunStage::Error);
    assert_eq!(
        ctl.run().error.as_deref(),
        Some("pipeline finished with status: failed")
    );
    assert_eq!(ctl.run().logs.last(), Some("STATUS: failed"));
    assert!(!journal_of(&journal).iter().any(|e| e.starts_with("insights:")));
}

#[tokio::test]
async fn test_stream_end_without_status() {
    let backend = MockPipeline::new(vec![message("partial")]);
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let stage = runner.run_all(&mut ctl).await.unwrap();

    assert_eq!(stage, RunStage::Error);
    assert_eq!(ctl.run().error.as_deref(), Some(CHANNEL_CLOSED_EARLY));
    assert!(!runner.has_open_channel());
}

#[tokio::test]
async fn test_stream_error_fails_with_generic_text() {
    let backend = MockPipeline::new(vec![Err(StudioError::network("reset by peer"))]);
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let stage = runner.run_all(&mut ctl).await.unwrap();

    assert_eq!(stage, RunStage::Error);
    assert_eq!(ctl.run().error.as_deref(), Some("Request failed"));
}

#[tokio::test]
async fn test_start_failure_is_recorded() {
    let mut backend = MockPipeline::new(Vec::new());
    backend.start_error = Some(StudioError::http(503, None));
    let mut runner = PipelineRunner::new(backend);
    let mut ctl = RunController::default();

    let stage = runner.run_all(&mut ctl).await.unwrap();

    assert_eq!(stage, RunStage::Error);
    assert_eq!(ctl.run().error.as_deref(), Some("Server error"));
    assert!(ctl.run().run_id.is_none());
}
