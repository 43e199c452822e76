//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `gpp_scanner` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use gpp_scanner::initialization::init_logger_with;
use gpp_scanner::{execute, Cli, RunStatus};

/// Exit status for a run stopped by Ctrl-C
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level_filter(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    // First Ctrl-C stops scheduling new work; results gathered so far are still
    // stored and exported.
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, finishing up");
            interrupt.cancel();
        }
    });

    match execute(cli, cancel).await {
        Ok(RunStatus::Completed) => Ok(()),
        Ok(RunStatus::Interrupted) => process::exit(EXIT_INTERRUPTED),
        Err(e) => {
            eprintln!("gpp_scanner error: {:#}", e);
            process::exit(1);
        }
    }
}
