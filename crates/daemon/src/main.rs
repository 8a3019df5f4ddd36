// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest watch service (wdd)
//!
//! Long-running process that watches the flag directory and runs jobs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use wd_daemon::lifecycle::{self, LifecycleError};
use wd_daemon::{Args, WATCH_CONFIG_ENV};

/// Startup marker prefix written to the log before anything else.
/// Full format: "--- wdd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- wdd: starting (pid: ";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.resolve(std::env::var_os(WATCH_CONFIG_ENV).map(PathBuf::from))?;

    let log_dir = lifecycle::log_dir(&config);
    if let Some(dir) = &log_dir {
        write_startup_marker(dir)?;
    }
    let _log_guard = setup_logging(log_dir.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), "starting wdd");

    let shutdown = CancellationToken::new();
    listen_for_signals(shutdown.clone())?;

    let daemon = match lifecycle::startup(config).await {
        Ok(d) => d,
        Err(e) => {
            error!("failed to start: {}", e);
            return Err(e.into());
        }
    };

    // Signal ready for a supervising process
    println!("READY");

    daemon.run(shutdown).await;
    info!("wdd stopped");
    Ok(())
}

/// Cancel `shutdown` on SIGTERM or SIGINT
#[cfg(unix)]
fn listen_for_signals(shutdown: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
        shutdown.cancel();
    });
    Ok(())
}

#[cfg(not(unix))]
fn listen_for_signals(shutdown: CancellationToken) -> std::io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received ctrl-c, shutting down");
        }
        shutdown.cancel();
    });
    Ok(())
}

/// Append the startup marker to the log file
fn write_startup_marker(log_dir: &Path) -> Result<(), LifecycleError> {
    use std::io::Write;

    std::fs::create_dir_all(log_dir)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(lifecycle::log_path(log_dir))?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Log to stderr, and to `<log_dir>/wdd.log` when a log directory is known
fn setup_logging(
    log_dir: Option<&Path>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = fmt::layer().with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .try_init()
            .context("installing log subscriber")?;
        return Ok(None);
    };

    let file_appender = tracing_appender::rolling::never(dir, "wdd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .context("installing log subscriber")?;
    Ok(Some(guard))
}
