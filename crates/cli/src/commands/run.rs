// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wd run`: run one job in the foreground

use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wd_adapters::{
    platform_copy, FsArchiver, HttpSubmitClient, ProcessScriptRunner, TracedCopyStrategy,
    TracedSubmitClient, WebhookNotifier,
};
use wd_core::WatchConfig;
use wd_engine::{JobDeps, JobRunner, RunJob};

#[derive(Args)]
pub struct RunArgs {
    /// Manifest file describing the job
    pub manifest: PathBuf,

    /// Watch configuration supplying the webhook and archive directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave the manifest in place after a successful run
    #[arg(long)]
    pub no_archive: bool,
}

pub async fn handle(args: RunArgs) -> anyhow::Result<ExitCode> {
    let config = args
        .config
        .as_deref()
        .map(WatchConfig::load)
        .transpose()?;
    let spec = super::load_manifest(&args.manifest)?;

    if let Some(time) = spec.schedule_time {
        eprintln!("note: ignoring schedule_time {}; running now", time);
    }

    let archive_dir = match (&config, args.no_archive) {
        (Some(config), false) => Some(config.manifest_complete.clone()),
        _ => None,
    };
    if let Some(dir) = &archive_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;
    }

    let notify = config
        .as_ref()
        .and_then(|c| c.webhook_url.as_deref())
        .map(WebhookNotifier::new);
    let runner = JobRunner::new(JobDeps {
        copier: TracedCopyStrategy::new(platform_copy()),
        scripts: ProcessScriptRunner::new(),
        submit: TracedSubmitClient::new(HttpSubmitClient::default()),
        notify,
        // Only consulted when archiving is on
        archiver: FsArchiver::new(archive_dir.clone().unwrap_or_default()),
    });
    let runner = match archive_dir {
        Some(_) => runner,
        None => runner.without_archive(),
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("interrupted; stopping after the current stage");
            on_interrupt.cancel();
        }
    });

    let started = Instant::now();
    let result = runner.run(&args.manifest, &spec, &cancel).await;
    let elapsed = humantime::format_duration(Duration::from_secs(started.elapsed().as_secs()));

    match result {
        Ok(()) => {
            println!("done: {} ({})", spec.name, elapsed);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("failed: {}: {}", spec.name, e);
            Ok(ExitCode::FAILURE)
        }
    }
}
