// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job runner: the per-manifest pipeline
//!
//! Stages run in order (execute, notify the transfer service, archive) and
//! the first failure ends the job. Cancellation is observed between stages;
//! an in-flight stage is allowed to finish but its result is discarded.

use crate::alerts;
use crate::error::JobError;
use crate::executor::Executor;
use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use wd_adapters::{Archiver, CopyStrategy, NotifyAdapter, ScriptRunner, SubmitClient};
use wd_core::{Alert, JobStage, ManifestSpec, SubmitJobRequest};

/// Runs one job to completion
#[async_trait]
pub trait RunJob: Clone + Send + Sync + 'static {
    async fn run(
        &self,
        manifest: &Path,
        spec: &ManifestSpec,
        cancel: &CancellationToken,
    ) -> Result<(), JobError>;
}

/// Adapter dependencies of the runner
pub struct JobDeps<C, R, S, N, A> {
    pub copier: C,
    pub scripts: R,
    pub submit: S,
    pub notify: N,
    pub archiver: A,
}

/// The production pipeline
#[derive(Clone)]
pub struct JobRunner<C, R, S, N, A> {
    executor: Executor<C, R, N>,
    submit: S,
    notify: N,
    archiver: A,
    archive: bool,
}

impl<C, R, S, N, A> JobRunner<C, R, S, N, A>
where
    C: CopyStrategy,
    R: ScriptRunner,
    S: SubmitClient,
    N: NotifyAdapter,
    A: Archiver,
{
    pub fn new(deps: JobDeps<C, R, S, N, A>) -> Self {
        Self {
            executor: Executor::new(deps.copier, deps.scripts, deps.notify.clone()),
            submit: deps.submit,
            notify: deps.notify,
            archiver: deps.archiver,
            archive: true,
        }
    }

    /// Leave the manifest in place after a successful run
    pub fn without_archive(mut self) -> Self {
        self.archive = false;
        self
    }

    async fn failed(&self, stage: JobStage, alert: Alert, error: JobError) -> Result<(), JobError> {
        tracing::error!(stage = %stage, error = %error, "job failed");
        alerts::emit(&self.notify, alert).await;
        Err(error)
    }
}

fn checkpoint(cancel: &CancellationToken, next: JobStage) -> Result<(), JobError> {
    if cancel.is_cancelled() {
        tracing::info!(next = %next, "job cancelled");
        return Err(JobError::Cancelled);
    }
    Ok(())
}

#[async_trait]
impl<C, R, S, N, A> RunJob for JobRunner<C, R, S, N, A>
where
    C: CopyStrategy,
    R: ScriptRunner,
    S: SubmitClient,
    N: NotifyAdapter,
    A: Archiver,
{
    async fn run(
        &self,
        manifest: &Path,
        spec: &ManifestSpec,
        cancel: &CancellationToken,
    ) -> Result<(), JobError> {
        let path = manifest.display().to_string();
        let start = Instant::now();
        tracing::info!(
            manifest = %path,
            name = %spec.name,
            subject_id = %spec.subject_id,
            platform = %spec.platform,
            project = %spec.project_name,
            max_attempts = spec.max_attempts,
            "running job"
        );
        alerts::emit(&self.notify, Alert::job_started(&path)).await;

        checkpoint(cancel, JobStage::Executing)?;
        let executed_at = Instant::now();
        if let Err(e) = self.executor.execute(spec).await {
            let alert = match &e {
                JobError::Script { command, error } => {
                    Alert::script_failed(command, &spec.name, &error.to_string())
                }
                other => Alert::copy_failed(&path, &other.to_string()),
            };
            return self.failed(JobStage::Executing, alert, e).await;
        }
        tracing::info!(
            elapsed_s = executed_at.elapsed().as_secs(),
            script = spec.is_script(),
            "data staged"
        );

        checkpoint(cancel, JobStage::Notifying)?;
        let submitted_at = Instant::now();
        let request = SubmitJobRequest::from_spec(spec);
        if let Err(e) = self.submit.submit(&spec.transfer_endpoint, &request).await {
            let alert = Alert::submit_failed(&spec.name, &e.to_string());
            return self.failed(JobStage::Notifying, alert, e.into()).await;
        }
        tracing::info!(
            elapsed_s = submitted_at.elapsed().as_secs(),
            "transfer service notified"
        );

        tracing::info!(elapsed_s = start.elapsed().as_secs(), "job complete");
        alerts::emit(&self.notify, Alert::job_complete(&path)).await;

        checkpoint(cancel, JobStage::Archiving)?;
        if self.archive {
            match self.archiver.archive(manifest).await {
                Ok(moved) => tracing::info!(to = %moved.display(), "manifest archived"),
                Err(e) => {
                    let alert = Alert::archive_failed(&path, &e.to_string());
                    return self.failed(JobStage::Archiving, alert, e.into()).await;
                }
            }
        }

        tracing::debug!(stage = %JobStage::Done, "job finished");
        Ok(())
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
