// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest fixtures for engine unit tests

use crate::error::JobError;
use crate::runner::RunJob;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wd_core::manifest::{NamedLists, DEFAULT_MAX_ATTEMPTS, DEFAULT_TRANSFER_ENDPOINT};
use wd_core::{ManifestSpec, Payload};

fn base(name: &str, destination: &Path, payload: Payload) -> ManifestSpec {
    ManifestSpec {
        name: name.to_string(),
        processor_full_name: "Test Operator".to_string(),
        subject_id: "123456".to_string(),
        acquisition_datetime: NaiveDate::from_ymd_opt(2024, 4, 9)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
        schedule_time: None,
        platform: "ecephys".to_string(),
        capsule: None,
        s3_bucket: None,
        project_name: "Test Project".to_string(),
        destination: destination.display().to_string().replace('\\', "/"),
        payload,
        force_cloud_sync: false,
        max_attempts: DEFAULT_MAX_ATTEMPTS,
        transfer_endpoint: DEFAULT_TRANSFER_ENDPOINT.to_string(),
    }
}

pub(crate) fn transfer_spec(
    name: &str,
    destination: &Path,
    modalities: &[(&str, Vec<String>)],
    schemas: Vec<String>,
) -> ManifestSpec {
    let modalities = NamedLists(
        modalities
            .iter()
            .map(|(m, files)| (m.to_string(), files.clone()))
            .collect(),
    );
    base(
        name,
        destination,
        Payload::Transfer {
            modalities,
            schemas,
        },
    )
}

pub(crate) fn script_spec(name: &str, destination: &Path, commands: &[(&str, &[&str])]) -> ManifestSpec {
    let commands = NamedLists(
        commands
            .iter()
            .map(|(c, argv)| (c.to_string(), argv.iter().map(|a| a.to_string()).collect()))
            .collect(),
    );
    base(name, destination, Payload::Script { commands })
}

/// Runner that records job names and can be slowed down or made to fail.
///
/// With `ignore_cancel` set it behaves like a stage in flight: it sleeps out
/// its full delay and only then reports the cancellation.
#[derive(Clone, Default)]
pub(crate) struct RecordingRunner {
    pub(crate) runs: Arc<Mutex<Vec<String>>>,
    pub(crate) ignore_cancel: Arc<AtomicBool>,
    pub(crate) fail_with: Arc<Mutex<Option<String>>>,
    pub(crate) delay: Arc<Mutex<Duration>>,
    pub(crate) running: Arc<AtomicUsize>,
    pub(crate) peak: Arc<AtomicUsize>,
}

impl RecordingRunner {
    pub(crate) fn runs(&self) -> Vec<String> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl RunJob for RecordingRunner {
    async fn run(
        &self,
        _manifest: &Path,
        spec: &ManifestSpec,
        cancel: &CancellationToken,
    ) -> Result<(), JobError> {
        self.runs.lock().unwrap().push(spec.name.clone());
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        let cancelled = if self.ignore_cancel.load(Ordering::SeqCst) {
            tokio::time::sleep(delay).await;
            cancel.is_cancelled()
        } else {
            tokio::select! {
                _ = cancel.cancelled() => true,
                _ = tokio::time::sleep(delay) => false,
            }
        };
        self.running.fetch_sub(1, Ordering::SeqCst);

        if cancelled {
            return Err(JobError::Cancelled);
        }
        match self.fail_with.lock().unwrap().clone() {
            Some(reason) => Err(JobError::MissingSource(reason)),
            None => Ok(()),
        }
    }
}
