//! fswatch - print coalesced batches of file changes under a directory
//!
//! Each line on stdout is one batch. Any error from the watcher is fatal.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fswatch_cli::apply_overrides;
use fswatch_cli::output::{render_batch, OutputFormat};
use fswatch_core::config::Config;
use fswatch_watcher::{WatchStreams, Watcher, WatcherConfig};
use std::path::PathBuf;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "fswatch")]
#[command(about = "Recursively watch a directory and print coalesced change batches")]
#[command(version)]
struct Cli {
    /// Directory to watch
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Coalesce interval, e.g. 500ms or 2s (default: 500ms)
    #[arg(short = 'd', long = "interval", value_name = "DURATION")]
    interval: Option<humantime::Duration>,

    /// Name relative to DIR to ignore (repeatable)
    #[arg(short, long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print each batch as a JSON array
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(
        &mut config.watch,
        cli.interval.map(Into::into),
        &cli.ignore,
    );
    config.validate()?;

    let watcher_config = WatcherConfig::from_settings(&cli.dir, &config.watch);
    let streams = Watcher::start(watcher_config)
        .with_context(|| format!("Failed to watch {}", cli.dir.display()))?;

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Plain
    };

    run(streams, format).await
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fswatch={level},fswatch_cli={level},fswatch_watcher={level},fswatch_core={level}"
        ))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

/// Print batches until the watch ends; the first error terminates
async fn run(mut streams: WatchStreams, format: OutputFormat) -> Result<()> {
    info!("Waiting for changes");

    loop {
        tokio::select! {
            Some(batch) = streams.events.recv() => {
                debug!("Received batch of {} paths", batch.len());
                println!("{}", render_batch(&batch, format)?);
            }
            Some(err) = streams.errors.recv() => {
                error!("Watcher error: {}", err);
                return Err(anyhow::Error::new(err).context("Watch failed"));
            }
            else => break,
        }
    }

    info!("Watch ended");
    Ok(())
}
