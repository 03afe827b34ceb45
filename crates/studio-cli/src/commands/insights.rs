use anyhow::Result;
use studio_core::render::{preview_lines, sentiment_cards};
use studio_core::run::{RunController, RunEvent, RunResult};
use studio_interaction::PipelineRunner;
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::ui;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runner = PipelineRunner::new(ctx.pipeline_client()).with_events(tx);

    ui::heading("Insights pipeline");
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                RunEvent::StageChanged { stage } => println!("{}", ui::muted(&format!("» {stage}"))),
                RunEvent::Preview { rows } => {
                    ui::heading("Raw preview");
                    for line in preview_lines(Some(rows.as_slice())) {
                        println!("  {line}");
                    }
                    ui::heading("Live log");
                }
                RunEvent::Log { line } => println!("  {line}"),
                RunEvent::Failed { message } => ui::error(&message),
                RunEvent::Step { .. } | RunEvent::Completed { .. } => {}
            }
        }
    });

    let mut ctl = RunController::new(ctx.config.log_capacity);
    let outcome = tokio::select! {
        outcome = runner.run_all(&mut ctl) => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };
    runner.shutdown();
    drop(runner);
    let _ = printer.await;

    let Some(outcome) = outcome else {
        ui::notice("Interrupted; stream closed.");
        return Ok(());
    };
    outcome?;

    if let Some(RunResult::Sentiment { records, .. }) = &ctl.run().result {
        ui::heading(&format!("Insights ({})", records.len()));
        for card in sentiment_cards(records) {
            ui::print_card(&card);
        }
    }
    Ok(())
}
