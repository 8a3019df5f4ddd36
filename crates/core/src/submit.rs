// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request body for the data transfer service

use crate::manifest::{ManifestSpec, S3Bucket};
use serde::{Deserialize, Serialize};

/// Date-time format the transfer service expects
pub const ACQ_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `POST` body: a batch of upload jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitJobRequest {
    pub upload_jobs: Vec<UploadJobConfig>,
}

/// One modality folder staged under the job directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityConfig {
    pub modality: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadJobConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<S3Bucket>,
    pub platform: String,
    pub subject_id: String,
    pub acq_datetime: String,
    pub modalities: Vec<ModalityConfig>,
    pub metadata_dir: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_capsule_id: Option<String>,
    pub project_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data_mount: Option<String>,
    pub force_cloud_sync: bool,
}

impl SubmitJobRequest {
    /// Build the request announcing a staged job.
    ///
    /// Script jobs report no modalities; only the metadata directory.
    pub fn from_spec(spec: &ManifestSpec) -> Self {
        let modalities = spec
            .modalities()
            .iter()
            .map(|(modality, _)| ModalityConfig {
                modality: modality.clone(),
                source: spec.modality_dir(modality),
            })
            .collect();

        let job = UploadJobConfig {
            s3_bucket: spec.s3_bucket,
            platform: spec.platform.clone(),
            subject_id: spec.subject_id.clone(),
            acq_datetime: spec
                .acquisition_datetime
                .format(ACQ_DATETIME_FORMAT)
                .to_string(),
            modalities,
            metadata_dir: spec.job_dir(),
            process_capsule_id: spec.capsule.as_ref().map(|c| c.capsule_id.clone()),
            project_name: spec.project_name.clone(),
            input_data_mount: spec.capsule.as_ref().map(|c| c.mount.clone()),
            force_cloud_sync: spec.force_cloud_sync,
        };

        Self {
            upload_jobs: vec![job],
        }
    }
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
