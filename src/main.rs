// Clippy
#![deny(clippy::unwrap_used)] // use context/with_context
#![deny(clippy::expect_used)] // use context/with_context

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::prelude::*;
mod cmd;
mod config;
mod currency;
mod inventory;
mod io;
mod lifecycle;
mod report;

/// Hardware asset lifecycle reports
#[derive(Parser, Debug)]
#[clap(about, author, version, name = "atrack")]
struct Args {
    #[clap(subcommand)]
    action: Subcommands,
    /// A config file to use. [default: $XDG_CONFIG_HOME/atrack/config.toml]
    #[clap(short, long, env = "ATRACK_CONFIG", value_name = "file")]
    pub config: Option<PathBuf>,
    /// Enable verbose logging.
    #[clap(short)]
    pub v: bool,
}

impl Args {
    #[tracing::instrument(level = "trace", skip(self))]
    pub async fn run(self) -> Result<()> {
        match self.action {
            Subcommands::Report(inner) => inner.run(self.config).await,
            Subcommands::Browse(inner) => inner.run(self.config).await,
            Subcommands::Inventory(inner) => inner.run(self.config).await,
            Subcommands::Config(inner) => inner.run(self.config).await,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    Report(cmd::ReportCmd),
    Browse(cmd::BrowseCmd),
    Inventory(cmd::InventoryCmd),
    Config(cmd::ConfigCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(windows)]
    if let Err(err) = ansi_term::enable_ansi_support() {
        eprintln!("error enabling ANSI support: {:?}", err);
    }

    // Filter spans based on the RUST_LOG env var or -v flag.
    let (verbose, log_filter) =
        match tracing_subscriber::EnvFilter::try_from_default_env() {
            Ok(filter) => {
                let verbose = filter
                    .max_level_hint()
                    .map_or(false, |level| level >= Level::DEBUG);
                (verbose, filter)
            }
            Err(_) => (
                args.v,
                tracing_subscriber::EnvFilter::new(if args.v {
                    "info,atrack=trace"
                } else {
                    "info"
                }),
            ),
        };

    // Enable tracing/logging
    tracing_subscriber::registry()
        // Filter spans based on the RUST_LOG env var or -v flag.
        .with(log_filter)
        // Format tracing
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        // Install this registry as the global tracing registry.
        .try_init()
        .context("error initializing logging")?;

    if let Err(err) = args.run().await {
        if verbose {
            error!("{err:?}");
        } else {
            error!(
                "{err}\n\nEnable verbose logging (-v) for the full stack trace."
            );
        }
        std::process::exit(1);
    }
    Ok(())
}
