// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer executor: stages data or runs the user's script

use crate::alerts;
use crate::error::JobError;
use std::path::{Path, PathBuf};
use wd_adapters::{CopyStrategy, NotifyAdapter, ScriptRunner};
use wd_core::{Alert, ManifestSpec, Payload};

/// Executes the payload of a job
#[derive(Clone)]
pub struct Executor<C, R, N> {
    copier: C,
    scripts: R,
    notify: N,
}

impl<C, R, N> Executor<C, R, N>
where
    C: CopyStrategy,
    R: ScriptRunner,
    N: NotifyAdapter,
{
    pub fn new(copier: C, scripts: R, notify: N) -> Self {
        Self {
            copier,
            scripts,
            notify,
        }
    }

    /// Run whichever payload the manifest carries
    pub async fn execute(&self, spec: &ManifestSpec) -> Result<(), JobError> {
        match &spec.payload {
            Payload::Transfer { .. } => self.copy(spec).await,
            Payload::Script { .. } => self.run_script(spec).await,
        }
    }

    /// Copy every modality source and schema file into the destination.
    ///
    /// Stops at the first failure; anything already copied stays.
    pub async fn copy(&self, spec: &ManifestSpec) -> Result<(), JobError> {
        let (modalities, schemas) = match &spec.payload {
            Payload::Transfer {
                modalities,
                schemas,
            } => (modalities, schemas),
            Payload::Script { .. } => return Ok(()),
        };

        for (modality, sources) in modalities.iter() {
            let dest = PathBuf::from(spec.modality_dir(modality));
            create_dir(&dest).await?;
            for source in sources {
                self.copy_one(Path::new(source), &dest).await?;
            }
        }

        if !schemas.is_empty() {
            let job_dir = PathBuf::from(spec.job_dir());
            create_dir(&job_dir).await?;
            for schema in schemas {
                self.copy_one(Path::new(schema), &job_dir).await?;
            }
        }

        Ok(())
    }

    async fn copy_one(&self, source: &Path, dest: &Path) -> Result<(), JobError> {
        if !tokio::fs::try_exists(source).await.unwrap_or(false) {
            return Err(JobError::MissingSource(source.display().to_string()));
        }
        self.copier.copy(source, dest).await?;
        Ok(())
    }

    /// Run each command in manifest order, alerting after each success
    pub async fn run_script(&self, spec: &ManifestSpec) -> Result<(), JobError> {
        let commands = match &spec.payload {
            Payload::Script { commands } => commands,
            Payload::Transfer { .. } => return Ok(()),
        };

        for (command, argv) in commands.iter() {
            tracing::info!(command = %command, job = %spec.name, "running script");
            self.scripts
                .run(argv)
                .await
                .map_err(|error| JobError::Script {
                    command: command.to_string(),
                    error,
                })?;
            alerts::emit(&self.notify, Alert::script_succeeded(command, &spec.name)).await;
        }

        Ok(())
    }
}

async fn create_dir(path: &Path) -> Result<(), JobError> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| JobError::CreateDir {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
