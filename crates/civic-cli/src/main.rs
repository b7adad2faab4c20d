//! Civic Triage
//!
//! Command-line front end: classify report text, analyze it, rank a list of
//! issues around a point, or run a report through the submission flow.

use anyhow::Result;
use clap::{Parser, Subcommand};
use civic_core::{IssueCategory, PriorityLevel, ReportStatus};
use civic_ranking::SortKey;
use civic_telemetry::MetricsCollector;
use tracing::{debug, info};

mod commands;
mod config;

use config::CivicConfig;

#[derive(Parser, Debug)]
#[command(name = "civic-triage")]
#[command(about = "Civic issue triage and proximity ranking", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "civic.yaml", env = "CIVIC_CONFIG")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Suggest category, priority and tags for a report
    Classify {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// Seed for reproducible confidence and similar-issue figures
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Sentiment, urgency and keywords for a report
    Analyze {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Rank issues from a YAML or JSON file around a point
    Rank {
        /// File holding a list of issues
        issues: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// distance, priority or date; defaults to the configured key
        #[arg(short, long)]
        sort: Option<SortKey>,

        /// Only issues within this many kilometers
        #[arg(long)]
        radius: Option<f64>,

        /// Use the configured nearby radius, nearest first
        #[arg(long, conflicts_with_all = ["sort", "radius"])]
        nearby: bool,

        #[arg(long)]
        min_priority: Option<PriorityLevel>,

        /// pending, in-progress or resolved; all issues when omitted
        #[arg(long)]
        status: Option<ReportStatus>,
    },

    /// Classify a report, fill in confident suggestions and submit it in memory
    Submit {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        /// Kept even when the classifier suggests otherwise
        #[arg(long)]
        category: Option<IssueCategory>,

        /// Kept even when the classifier suggests otherwise
        #[arg(long)]
        priority: Option<PriorityLevel>,

        /// Replace the title with the suggested one
        #[arg(long)]
        accept_title: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let seed = match &cli.command {
        Command::Classify { seed, .. } => *seed,
        _ => None,
    };
    let config = CivicConfig::load(&cli.config, seed)?;
    info!(path = %cli.config, "configuration loaded");

    let metrics = MetricsCollector::new();
    let output = commands::run(cli.command, &config, &metrics).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    debug!(metrics = ?metrics.snapshot(), "session metrics");

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("civic=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("civic=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
