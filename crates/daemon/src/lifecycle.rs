// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service lifecycle: startup, recovery, shutdown.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use wd_adapters::{
    platform_copy, FsArchiver, HttpSubmitClient, PlatformCopy, ProcessScriptRunner,
    TracedCopyStrategy, TracedSubmitClient, WebhookNotifier,
};
use wd_core::{ConfigError, FsEvent, SystemClock, UuidIdGen, WatchConfig};
use wd_engine::{Dispatcher, JobDeps, JobRegistry, JobRunner, RegistryConfig};

use crate::watcher::DirWatcher;

/// Alerts go to the webhook when one is configured, otherwise only to the log
pub type DaemonNotify = Option<WebhookNotifier>;

/// Job runner with the production adapters (wrapped with tracing)
pub type DaemonRunner = JobRunner<
    TracedCopyStrategy<PlatformCopy>,
    ProcessScriptRunner,
    TracedSubmitClient<HttpSubmitClient>,
    DaemonNotify,
    FsArchiver,
>;

pub type DaemonRegistry = JobRegistry<DaemonRunner, DaemonNotify, SystemClock, UuidIdGen>;

type DaemonDispatcher = Dispatcher<DaemonRunner, DaemonNotify, SystemClock, UuidIdGen>;

/// Buffered file events between the watcher thread and the dispatcher
const EVENT_BUFFER: usize = 256;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("no configuration: pass --config-path, or -f and -m, or set WATCH_CONFIG")]
    NoConfig,

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("flag directory {0} does not exist or is not a directory")]
    FlagDirMissing(PathBuf),

    #[error("could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not watch {path}: {source}")]
    Watch {
        path: PathBuf,
        source: notify::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running service
pub struct Daemon {
    pub config: WatchConfig,
    dispatcher: DaemonDispatcher,
    events: mpsc::Receiver<FsEvent>,
    // Held for its Drop; stops OS notifications when the daemon goes away
    _watcher: DirWatcher,
}

impl Daemon {
    pub fn registry(&self) -> &DaemonRegistry {
        self.dispatcher.registry()
    }

    /// Dispatch events until `shutdown` fires, then cancel and drain all jobs
    pub async fn run(self, shutdown: CancellationToken) {
        let Daemon {
            dispatcher, events, ..
        } = self;
        dispatcher.run(events, shutdown).await;
        dispatcher.registry().shutdown().await;
        info!("service shutdown complete");
    }
}

/// The flag directory must already exist; the archive directory is created
pub fn prepare_dirs(config: &WatchConfig) -> Result<(), LifecycleError> {
    if !config.flag_dir.is_dir() {
        return Err(LifecycleError::FlagDirMissing(config.flag_dir.clone()));
    }
    std::fs::create_dir_all(&config.manifest_complete).map_err(|source| {
        LifecycleError::CreateDir {
            path: config.manifest_complete.clone(),
            source,
        }
    })?;
    Ok(())
}

/// Start the service
///
/// The watch is registered before existing manifests are recovered so that
/// nothing written during startup is missed. A manifest seen by both is
/// scheduled twice; the second schedule replaces the first.
pub async fn startup(config: WatchConfig) -> Result<Daemon, LifecycleError> {
    prepare_dirs(&config)?;
    info!("{}", config.summary());

    let notify: DaemonNotify = config.webhook_url.as_deref().map(WebhookNotifier::new);
    let runner = JobRunner::new(JobDeps {
        copier: TracedCopyStrategy::new(platform_copy()),
        scripts: ProcessScriptRunner::new(),
        submit: TracedSubmitClient::new(HttpSubmitClient::default()),
        notify: notify.clone(),
        archiver: FsArchiver::new(&config.manifest_complete),
    });
    let registry = JobRegistry::new(
        runner,
        notify.clone(),
        SystemClock,
        UuidIdGen,
        RegistryConfig::from(&config),
    );
    let dispatcher = Dispatcher::new(registry, notify, config.debounce());

    let (tx, events) = mpsc::channel(EVENT_BUFFER);
    let watcher = DirWatcher::start(&config.flag_dir, tx).map_err(|source| {
        LifecycleError::Watch {
            path: config.flag_dir.clone(),
            source,
        }
    })?;

    let recovered = dispatcher.recover(&config.flag_dir).await?;
    info!(count = recovered.len(), "recovered manifests at startup");

    Ok(Daemon {
        config,
        dispatcher,
        events,
        _watcher: watcher,
    })
}

/// Log directory: configured, or the platform state directory
pub fn log_dir(config: &WatchConfig) -> Option<PathBuf> {
    config.log_dir.clone().or_else(default_log_dir)
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join("wd"))
}

/// Path of the service log file inside `dir`
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("wdd.log")
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
