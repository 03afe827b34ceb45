use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use studio_core::render::{DONE_CHIP, JsonView, insight_sections, log_text, step_chips};
use studio_core::Variant;
use studio_core::run::{Run, RunController, RunEvent, RunResult};
use studio_interaction::DiscoveryRunner;
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::{clipboard, ui};

#[derive(Args, Debug)]
pub struct DiscoveryArgs {
    /// Transcript to analyse: sanitized or sensitive
    #[arg(long, default_value = "sanitized", value_parser = Variant::from_str)]
    variant: Variant,

    /// Print the raw JSON result
    #[arg(long)]
    json: bool,

    /// Print the run log
    #[arg(long)]
    logs: bool,

    /// Save the JSON result to a file or directory
    #[arg(long)]
    download: Option<PathBuf>,

    /// Copy the JSON result to the clipboard
    #[arg(long)]
    copy: bool,

    /// Reveal all steps at once
    #[arg(long)]
    no_pacing: bool,
}

pub async fn run(ctx: &AppContext, args: DiscoveryArgs) -> Result<()> {
    let session_id = ctx.session_identity().get_or_create();

    ui::heading(args.variant.label());
    println!("{}", ui::muted(ctx.samples().transcript(args.variant).trim_end()));

    let delay = if args.no_pacing {
        Duration::ZERO
    } else {
        ctx.step_delay()
    };
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = DiscoveryRunner::new(ctx.discovery_client(), delay).with_events(tx);

    ui::heading("Steps");
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let RunEvent::Step { label, .. } = event {
                print!("{} ", ui::chip(&label, false));
                let _ = std::io::stdout().flush();
            }
        }
    });

    let mut ctl = RunController::new(ctx.config.log_capacity);
    let outcome = runner.run(&mut ctl, args.variant, &session_id).await;
    drop(runner);
    let _ = printer.await;
    outcome?;

    let run = ctl.run();
    match step_chips(run).last() {
        Some(last) if last == DONE_CHIP => println!("{}", ui::chip(last, true)),
        _ => println!(),
    }
    if let Some(message) = &run.error {
        ui::error(message);
    }
    if let Some(RunResult::Insights { report, raw }) = &run.result {
        print_summary(run);
        for section in insight_sections(report) {
            ui::print_section(&section);
        }
        export_json(raw, &args);
    }

    if args.logs {
        ui::heading("Logs");
        println!("{}", log_text(&run.logs));
    }
    Ok(())
}

fn print_summary(run: &Run) {
    let mut parts = Vec::new();
    if let Some(run_id) = &run.run_id {
        parts.push(format!("run {run_id}"));
    }
    if let Some(elapsed) = run.metrics.elapsed {
        parts.push(format!("{} ms", elapsed.as_millis()));
    }
    if run.metrics.cached {
        parts.push("cached".to_string());
    }
    if !parts.is_empty() {
        println!("{}", ui::muted(&parts.join(" · ")));
    }
}

fn export_json(raw: &serde_json::Value, args: &DiscoveryArgs) {
    if !(args.json || args.copy || args.download.is_some()) {
        return;
    }
    let view = match JsonView::new(raw) {
        Ok(view) => view,
        Err(e) => {
            ui::error(&e.to_string());
            return;
        }
    };
    if args.json {
        ui::heading("JSON");
        println!("{}", view.pretty());
    }
    if let Some(target) = &args.download {
        match view.download(target) {
            Ok(path) => ui::notice(&format!("Saved {}", path.display())),
            Err(e) => ui::error(&e.to_string()),
        }
    }
    if args.copy {
        match clipboard::copy(view.pretty()) {
            Ok(()) => ui::notice("Copied JSON to clipboard"),
            Err(e) => ui::error(&format!("Copy failed: {e}")),
        }
    }
}
