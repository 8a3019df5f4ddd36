// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wd - one-shot manifest tools
//!
//! Validate a manifest, run its job in the foreground, re-notify the
//! transfer service, or preview when a scheduled job would fire.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, run, submit, trigger};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "wd", version, about = "wd - manifest watchdog tools")]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a manifest and print what it describes
    Check(check::CheckArgs),
    /// Run a manifest's job once, now, in the foreground
    Run(run::RunArgs),
    /// Only notify the transfer service about an already staged job
    Submit(submit::SubmitArgs),
    /// Show when a job scheduled for a time of day would fire
    Trigger(trigger::TriggerArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Check(args) => check::handle(args),
        Commands::Run(args) => run::handle(args).await,
        Commands::Submit(args) => submit::handle(args).await,
        Commands::Trigger(args) => trigger::handle(args),
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
