use anyhow::Result;
use clap::{Parser, Subcommand};
use studio_infrastructure::StudioPaths;

mod clipboard;
mod commands;
mod context;
mod logging;
mod ui;

use commands::discovery::DiscoveryArgs;
use commands::estimate::EstimateArgs;
use commands::parking::ParkingArgs;
use context::{AppContext, EndpointOverrides};

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "AI Capability Studio - run the demos from a terminal", long_about = None)]
struct Cli {
    /// Base URL of the discovery service
    #[arg(long, global = true)]
    discovery_api: Option<String>,

    /// Base URL of the insights pipeline
    #[arg(long, global = true)]
    insights_api: Option<String>,

    /// Base URL of the pricing / estimate service
    #[arg(long, global = true)]
    cost_api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interview insights from a transcript, in one request
    Discovery {
        #[command(subcommand)]
        action: DiscoveryAction,
    },
    /// Sentiment pipeline with live progress
    Insights {
        #[command(subcommand)]
        action: InsightsAction,
    },
    /// Estimate the running cost of an LLM feature
    Estimate(EstimateArgs),
    /// Show the price list
    Pricing,
    /// List the estimator presets
    Presets,
    /// Parking availability forecast per street segment
    Parking(ParkingArgs),
    /// Show the demo session id
    Session {
        /// Replace the stored id with a new one
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
enum DiscoveryAction {
    /// Run the demo
    Run(DiscoveryArgs),
}

#[derive(Subcommand)]
enum InsightsAction {
    /// Run the pipeline
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = StudioPaths::default_root().unwrap_or_else(|e| {
        let fallback = std::env::temp_dir().join("studio");
        eprintln!("warning: {e}; using {}", fallback.display());
        StudioPaths::at(fallback)
    });
    if let Err(e) = logging::init(&paths.logs_dir()) {
        eprintln!("warning: file logging disabled: {e}");
        logging::init_stderr_only();
    }

    let overrides = EndpointOverrides {
        discovery_api: cli.discovery_api,
        insights_api: cli.insights_api,
        cost_api: cli.cost_api,
    };
    let ctx = AppContext::load(paths, &overrides)?;

    match cli.command {
        Commands::Discovery { action } => match action {
            DiscoveryAction::Run(args) => commands::discovery::run(&ctx, args).await?,
        },
        Commands::Insights { action } => match action {
            InsightsAction::Run => commands::insights::run(&ctx).await?,
        },
        Commands::Estimate(args) => commands::estimate::run(&ctx, args).await,
        Commands::Pricing => commands::estimate::pricing(&ctx).await,
        Commands::Presets => commands::estimate::presets(),
        Commands::Parking(args) => commands::parking::run(&ctx, args),
        Commands::Session { reset } => commands::session::run(&ctx, reset),
    }

    Ok(())
}
