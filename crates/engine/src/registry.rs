// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry: one tracked job per manifest path
//!
//! Scheduling a path cancels whatever job the path already has and inserts
//! the replacement under the same lock acquisition. Each job runs on its own
//! task: it waits for its fire time, takes a worker permit, then hands the
//! manifest to the runner. A worker only touches the entry carrying its own
//! id, so a finished job never removes its replacement.
//!
//! Cancellation is cooperative and a running stage finishes before its job
//! stops, so a replacement waits for every earlier worker on the same path to
//! exit before it starts.

use crate::alerts;
use crate::error::JobError;
use crate::runner::RunJob;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::{CancellationToken, DropGuard};
use tokio_util::task::TaskTracker;
use tracing::Instrument;
use wd_adapters::NotifyAdapter;
use wd_core::trigger::{delay_until, lateness};
use wd_core::{
    Alert, Clock, IdGen, JobEvent, JobId, JobState, JobSummary, ManifestSpec, WatchConfig,
};

/// When a scheduled job should fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum At {
    Now,
    Time(NaiveDateTime),
}

/// Caller's view of a scheduled job
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub id: JobId,
    pub path: String,
    pub fire_at: NaiveDateTime,
    cancel: CancellationToken,
}

impl JobHandle {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub max_concurrent_jobs: usize,
    pub misfire_grace: Duration,
}

impl From<&WatchConfig> for RegistryConfig {
    fn from(config: &WatchConfig) -> Self {
        Self {
            max_concurrent_jobs: config.max_concurrent_jobs,
            misfire_grace: config.misfire_grace(),
        }
    }
}

struct Entry {
    id: JobId,
    state: JobState,
    fire_at: NaiveDateTime,
    cancel: CancellationToken,
}

/// Exit signal of the newest worker spawned for a path
struct Tail {
    id: JobId,
    exited: CancellationToken,
}

struct Shared<J, N, C, I> {
    jobs: Mutex<HashMap<String, Entry>>,
    tails: Mutex<HashMap<String, Tail>>,
    permits: Arc<Semaphore>,
    runner: J,
    notify: N,
    clock: C,
    ids: I,
    misfire_grace: Duration,
    root: CancellationToken,
    tracker: TaskTracker,
}

impl<J, N, C, I> Shared<J, N, C, I> {
    /// Apply `event` to the entry for `path` if it still belongs to `id`
    fn apply(&self, path: &str, id: &JobId, event: JobEvent) -> Option<JobState> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|e| e.into_inner());
        let entry = jobs.get_mut(path).filter(|entry| entry.id == *id)?;
        let next = entry.state.transition(event);
        if next.is_retained() {
            entry.state = next.clone();
        } else {
            jobs.remove(path);
        }
        Some(next)
    }

    /// Forget the exit signal for `path` if `id` is still the newest worker
    fn release(&self, path: &str, id: &JobId) {
        let mut tails = self.tails.lock().unwrap_or_else(|e| e.into_inner());
        if tails.get(path).is_some_and(|tail| tail.id == *id) {
            tails.remove(path);
        }
    }
}

/// Owns every tracked job
pub struct JobRegistry<J, N, C, I> {
    shared: Arc<Shared<J, N, C, I>>,
}

impl<J, N, C, I> Clone for JobRegistry<J, N, C, I> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<J, N, C, I> JobRegistry<J, N, C, I>
where
    J: RunJob,
    N: NotifyAdapter,
    C: Clock,
    I: IdGen,
{
    pub fn new(runner: J, notify: N, clock: C, ids: I, config: RegistryConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                jobs: Mutex::new(HashMap::new()),
                tails: Mutex::new(HashMap::new()),
                permits: Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1))),
                runner,
                notify,
                clock,
                ids,
                misfire_grace: config.misfire_grace,
                root: CancellationToken::new(),
                tracker: TaskTracker::new(),
            }),
        }
    }

    /// Current time on the registry's clock
    pub fn now(&self) -> NaiveDateTime {
        self.shared.clock.now()
    }

    /// Track a job for `path`, replacing any job the path already has
    pub fn schedule(&self, path: impl Into<String>, spec: ManifestSpec, at: At) -> JobHandle {
        let path = path.into();
        let id = self.shared.ids.next();
        let fire_at = match at {
            At::Now => self.shared.clock.now(),
            At::Time(t) => t,
        };
        let cancel = self.shared.root.child_token();
        let exited = CancellationToken::new();

        let mut jobs = self.shared.jobs.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = jobs.remove(&path) {
            old.cancel.cancel();
            tracing::info!(path = %path, old = %old.id, new = %id, "superseded job");
        }
        let previous = self
            .shared
            .tails
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                path.clone(),
                Tail {
                    id: id.clone(),
                    exited: exited.clone(),
                },
            )
            .map(|tail| tail.exited);
        jobs.insert(
            path.clone(),
            Entry {
                id: id.clone(),
                state: JobState::Scheduled,
                fire_at,
                cancel: cancel.clone(),
            },
        );
        let worker = Worker {
            shared: Arc::clone(&self.shared),
            path: path.clone(),
            id: id.clone(),
            cancel: cancel.clone(),
            previous,
        };
        self.shared
            .tracker
            .spawn(worker.run(spec, fire_at, exited.drop_guard()));
        drop(jobs);

        tracing::info!(path = %path, id = %id, fire_at = %fire_at, "scheduled job");
        JobHandle {
            id,
            path,
            fire_at,
            cancel,
        }
    }

    /// Cancel and forget the job for `path`; returns whether there was one
    pub fn cancel(&self, path: &str) -> bool {
        let removed = self
            .shared
            .jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(path);
        match removed {
            Some(entry) => {
                entry.cancel.cancel();
                tracing::info!(path, id = %entry.id, "cancelled job");
                true
            }
            None => false,
        }
    }

    /// Point-in-time view of every tracked job, sorted by path
    pub fn snapshot(&self) -> Vec<JobSummary> {
        let jobs = self.shared.jobs.lock().unwrap_or_else(|e| e.into_inner());
        let mut summaries: Vec<JobSummary> = jobs
            .iter()
            .map(|(path, entry)| JobSummary {
                path: path.clone(),
                id: entry.id.clone(),
                state: entry.state.clone(),
                fire_at: entry.fire_at,
            })
            .collect();
        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        summaries
    }

    /// Number of jobs not yet finished
    pub fn live_count(&self) -> usize {
        let jobs = self.shared.jobs.lock().unwrap_or_else(|e| e.into_inner());
        jobs.values().filter(|e| e.state.is_live()).count()
    }

    /// Wait until every spawned job task has exited
    pub async fn wait_idle(&self) {
        self.shared.tracker.close();
        self.shared.tracker.wait().await;
        self.shared.tracker.reopen();
    }

    /// Cancel every job and wait for their tasks to exit
    pub async fn shutdown(&self) {
        tracing::info!(live = self.live_count(), "shutting down job registry");
        self.shared.root.cancel();
        self.shared.tracker.close();
        self.shared.tracker.wait().await;
    }
}

/// One scheduled job's task
struct Worker<J, N, C, I> {
    shared: Arc<Shared<J, N, C, I>>,
    path: String,
    id: JobId,
    cancel: CancellationToken,
    previous: Option<CancellationToken>,
}

impl<J, N, C, I> Worker<J, N, C, I>
where
    J: RunJob,
    N: NotifyAdapter,
    C: Clock,
    I: IdGen,
{
    async fn run(self, spec: ManifestSpec, fire_at: NaiveDateTime, _exited: DropGuard) {
        self.execute(spec, fire_at).await;
        self.shared.release(&self.path, &self.id);
    }

    fn apply(&self, event: JobEvent) -> Option<JobState> {
        self.shared.apply(&self.path, &self.id, event)
    }

    async fn execute(&self, spec: ManifestSpec, fire_at: NaiveDateTime) {
        let shared = &self.shared;
        let (path, id, cancel) = (&self.path, &self.id, &self.cancel);

        let delay = delay_until(shared.clock.now(), fire_at);
        if !delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.apply(JobEvent::Cancel);
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        if let Some(previous) = &self.previous {
            if !previous.is_cancelled() {
                tracing::info!(path = %path, id = %id, "waiting for superseded job to stop");
            }
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.apply(JobEvent::Cancel);
                    return;
                }
                _ = previous.cancelled() => {}
            }
        }

        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = Arc::clone(&shared.permits).acquire_owned() => permit.ok(),
        };
        let Some(_permit) = permit else {
            self.apply(JobEvent::Cancel);
            return;
        };

        let late = lateness(shared.clock.now(), fire_at);
        if late > shared.misfire_grace {
            tracing::warn!(path = %path, id = %id, late_s = late.as_secs(), "job misfired");
            self.apply(JobEvent::Misfire);
            alerts::emit(&shared.notify, Alert::misfired(path, late)).await;
            return;
        }

        if cancel.is_cancelled() || self.apply(JobEvent::Start).is_none() {
            self.apply(JobEvent::Cancel);
            return;
        }

        let span = tracing::info_span!("job", id = %id, path = %path);
        let result = shared
            .runner
            .run(Path::new(path), &spec, cancel)
            .instrument(span)
            .await;

        let event = match result {
            Ok(()) => JobEvent::Complete,
            Err(JobError::Cancelled) => JobEvent::Cancel,
            Err(e) => JobEvent::Fail {
                reason: e.to_string(),
            },
        };
        self.apply(event);
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
