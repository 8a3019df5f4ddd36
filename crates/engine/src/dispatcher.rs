// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatcher: turns filesystem events into registry operations

use crate::alerts;
use crate::registry::{At, JobHandle, JobRegistry};
use crate::runner::RunJob;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use wd_adapters::NotifyAdapter;
use wd_core::{
    compute_trigger, is_manifest_name, parse_manifest, Alert, Clock, FsEvent, FsEventKind, IdGen,
    ManifestSpec,
};

/// Consumes filesystem events in order and drives the registry
pub struct Dispatcher<J, N, C, I> {
    registry: JobRegistry<J, N, C, I>,
    notify: N,
    debounce: Duration,
}

impl<J, N, C, I> Dispatcher<J, N, C, I>
where
    J: RunJob,
    N: NotifyAdapter,
    C: Clock,
    I: IdGen,
{
    pub fn new(registry: JobRegistry<J, N, C, I>, notify: N, debounce: Duration) -> Self {
        Self {
            registry,
            notify,
            debounce,
        }
    }

    pub fn registry(&self) -> &JobRegistry<J, N, C, I> {
        &self.registry
    }

    /// Process events until the channel closes or `shutdown` fires.
    ///
    /// Events for a manifest that queue up while it settles are folded into
    /// the load that follows, since the load reads the file as it is then.
    pub async fn run(&self, mut events: mpsc::Receiver<FsEvent>, shutdown: CancellationToken) {
        let mut backlog = VecDeque::new();
        loop {
            let event = match backlog.pop_front() {
                Some(event) => event,
                None => tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => break,
                    event = events.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                },
            };

            let Some(path) = self.begin(&event) else {
                continue;
            };
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = self.settle() => {}
            }
            absorb(&mut events, &path, &mut backlog);
            self.load(&path).await;
        }
        tracing::info!("dispatcher stopped");
    }

    /// Handle one event; returns the scheduled job, if any
    pub async fn handle(&self, event: FsEvent) -> Option<JobHandle> {
        let path = self.begin(&event)?;
        self.settle().await;
        self.load(&path).await
    }

    /// Apply the immediate effect of an event.
    ///
    /// Returns the manifest to load once it has settled. A changed manifest
    /// drops its current job right away, so content that no longer parses
    /// never runs under the old spec.
    fn begin(&self, event: &FsEvent) -> Option<PathBuf> {
        if !is_manifest_name(&event.path) {
            tracing::trace!(path = %event.path.display(), "ignoring non-manifest path");
            return None;
        }

        let path = event.path.display().to_string();
        match event.kind {
            FsEventKind::Removed => {
                if self.registry.cancel(&path) {
                    tracing::info!(path = %path, "manifest removed, job cancelled");
                    self.log_jobs();
                }
                None
            }
            FsEventKind::Created | FsEventKind::Modified => {
                if event.path.is_dir() {
                    return None;
                }
                if self.registry.cancel(&path) {
                    tracing::info!(path = %path, "manifest changed, job dropped until reload");
                }
                tracing::debug!(
                    path = %path,
                    kind = ?event.kind,
                    debounce_s = self.debounce.as_secs(),
                    "manifest changed"
                );
                Some(event.path.clone())
            }
        }
    }

    /// Wait for writes to a changed manifest to finish
    async fn settle(&self) {
        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
    }

    fn log_jobs(&self) {
        for job in self.registry.snapshot() {
            tracing::debug!(
                path = %job.path,
                id = %job.id,
                state = %job.state,
                fire_at = %job.fire_at,
                "tracked job"
            );
        }
    }

    /// Schedule every manifest already present in `flag_dir`, in name order
    pub async fn recover(&self, flag_dir: &Path) -> std::io::Result<Vec<JobHandle>> {
        let mut paths: Vec<PathBuf> = Vec::new();
        let mut entries = tokio::fs::read_dir(flag_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_manifest_name(&path) && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        tracing::info!(count = paths.len(), dir = %flag_dir.display(), "recovering manifests");
        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(handle) = self.load(&path).await {
                handles.push(handle);
            }
        }
        Ok(handles)
    }

    /// Read, validate and schedule one manifest
    async fn load(&self, path: &Path) -> Option<JobHandle> {
        let shown = path.display().to_string();
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %shown, "manifest vanished before it was read");
                return None;
            }
            Err(e) => {
                alerts::emit(&self.notify, Alert::validation_failed(&shown, &e.to_string()))
                    .await;
                return None;
            }
        };

        let spec = match parse_manifest(&bytes) {
            Ok(spec) => spec,
            Err(e) => {
                tracing::warn!(path = %shown, field = ?e.field(), error = %e, "invalid manifest");
                alerts::emit(&self.notify, Alert::validation_failed(&shown, &e.to_string()))
                    .await;
                return None;
            }
        };

        let at = self.fire_time(&spec);
        let handle = self.registry.schedule(shown, spec, at);
        self.log_jobs();
        Some(handle)
    }

    fn fire_time(&self, spec: &ManifestSpec) -> At {
        match spec.schedule_time {
            Some(time) => At::Time(compute_trigger(self.registry.now(), time)),
            None => At::Now,
        }
    }
}

/// Move queued events into `backlog`, dropping changes to `path`.
///
/// A removal of `path` ends the folding so a later re-creation is still seen.
fn absorb(events: &mut mpsc::Receiver<FsEvent>, path: &Path, backlog: &mut VecDeque<FsEvent>) {
    let mut folding = !backlog
        .iter()
        .any(|e| e.path == path && e.kind == FsEventKind::Removed);
    backlog.retain(|e| !(folding && e.path == path && e.kind != FsEventKind::Removed));
    while let Ok(next) = events.try_recv() {
        if next.path == path {
            if next.kind == FsEventKind::Removed {
                folding = false;
            } else if folding {
                tracing::trace!(path = %path.display(), kind = ?next.kind, "folded event");
                continue;
            }
        }
        backlog.push_back(next);
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
