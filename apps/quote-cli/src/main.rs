//! # fare-quote
//!
//! Prints cab fare estimates as JSON.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ───► QuoteConfig::load ───► run(subcommand) ───► stdout (JSON)  │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                                  stderr (tracing)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use cabfare_cli::config::QuoteConfig;
use cabfare_cli::{render, run, Cli};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> ExitCode {
    // Logs to stderr so stdout stays pipeable
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match QuoteConfig::load(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if cli.pretty {
        config.output.pretty = true;
    }
    debug!(schedule = ?config.schedule, "Configuration loaded");

    match run(cli.command, &config).and_then(|value| render(&value, &config)) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Quote failed");
            ExitCode::FAILURE
        }
    }
}
