//! Shutdown coordinator demo.
//!
//! Runs one of several small applications wired to a process-wide
//! [`Shutdown`], each showing a different way a task reacts to it.
//!
//! ```text
//!   SIGINT/SIGTERM ──┐
//!                    ├──▶ Shutdown ──▶ workers observe, save, deregister
//!   --manual-after ──┘        │
//!                             └──▶ main: wait event → drain WaitGroup → exit
//! ```
//!
//! A second SIGINT/SIGTERM while draining kills the process immediately.

mod demo;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use shutdown_coordinator::config::{self, CoordinatorConfig};
use shutdown_coordinator::observability::logging;
use shutdown_coordinator::Shutdown;

#[derive(Parser)]
#[command(name = "shutdown-demo")]
#[command(about = "Graceful shutdown coordination demos", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trigger a manual shutdown after this many seconds.
    #[arg(short, long)]
    manual_after: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A registered worker that saves progress before exiting
    Worker,
    /// An unregistered ticker; main does its own cleanup
    Ticker,
    /// An HTTP server drained on shutdown
    Http {
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// A worker issuing context-aware queries
    Query,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => CoordinatorConfig::default(),
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("Logging unavailable: {}", e);
    }

    tracing::info!(
        signals = ?config.signals.watch,
        grace_period_secs = config.drain.grace_period_secs,
        "shutdown-demo v0.1.0 starting"
    );

    let shutdown = Shutdown::install(&config.signals)?;

    if let Some(secs) = cli.manual_after {
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            trigger.initiate_manual();
        });
    }

    let grace = Duration::from_secs(config.drain.grace_period_secs);
    match cli.command {
        Commands::Worker => demo::worker::run(&shutdown, grace).await?,
        Commands::Ticker => demo::ticker::run(&shutdown).await,
        Commands::Http { bind } => demo::http::run(&shutdown, &bind, grace).await?,
        Commands::Query => demo::query::run(&shutdown, grace).await?,
    }

    tracing::info!(reason = ?shutdown.reason(), "Shutdown complete");
    Ok(())
}
