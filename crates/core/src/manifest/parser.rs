// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest YAML parsing and validation

use super::types::{
    ManifestSpec, NamedLists, Payload, PipelineCapsule, S3Bucket,
    DEFAULT_MAX_ATTEMPTS, DEFAULT_TRANSFER_ENDPOINT,
};
use super::vocab::{canonical_modality, canonical_platform};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Output format for date-times written back to YAML
const DATETIME_OUT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Errors that reject a manifest
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("manifest is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
    #[error("unknown modality: {0}")]
    UnknownModality(String),
    #[error("capsule_id and mount must be given together")]
    CapsuleWithoutMount,
    #[error("a manifest cannot define both a script and modalities or schemas")]
    MixedPayload,
}

impl ValidationError {
    /// Name of the manifest field the error is about, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Yaml(_) => None,
            ValidationError::MissingField(field) => Some(field),
            ValidationError::InvalidField { field, .. } => Some(field),
            ValidationError::UnknownPlatform(_) => Some("platform"),
            ValidationError::UnknownModality(_) => Some("modalities"),
            ValidationError::CapsuleWithoutMount => Some("capsule_id"),
            ValidationError::MixedPayload => Some("script"),
        }
    }
}

/// Subject ids are integers in older manifests and strings in newer ones
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SubjectId {
    Number(i64),
    Text(String),
}

/// The manifest as it appears on disk
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processor_full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject_id: Option<SubjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    acquisition_datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capsule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s3_bucket: Option<S3Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<String>,
    #[serde(default, skip_serializing_if = "NamedLists::is_empty")]
    modalities: NamedLists,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    schemas: Vec<String>,
    #[serde(default, skip_serializing_if = "NamedLists::is_empty")]
    script: NamedLists,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    force_cloud_sync: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_attempts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transfer_endpoint: Option<String>,
}

/// Parse and validate a manifest from raw bytes
pub fn parse_manifest(bytes: &[u8]) -> Result<ManifestSpec, ValidationError> {
    let doc: ManifestDocument = serde_yaml::from_slice(bytes)?;
    validate(doc)
}

/// Parse and validate a manifest from a string
pub fn parse_manifest_str(content: &str) -> Result<ManifestSpec, ValidationError> {
    parse_manifest(content.as_bytes())
}

fn validate(doc: ManifestDocument) -> Result<ManifestSpec, ValidationError> {
    let name = required_text("name", doc.name)?;
    let processor_full_name = required_text("processor_full_name", doc.processor_full_name)?;
    let project_name = required_text("project_name", doc.project_name)?;
    let destination = normalize_path(&required_text("destination", doc.destination)?);

    let subject_id = match doc.subject_id {
        Some(SubjectId::Number(n)) => n.to_string(),
        Some(SubjectId::Text(s)) => required_text("subject_id", Some(s))?,
        None => return Err(ValidationError::MissingField("subject_id")),
    };

    let raw_acquired = required_text("acquisition_datetime", doc.acquisition_datetime)?;
    let acquisition_datetime =
        parse_datetime(&raw_acquired).ok_or_else(|| ValidationError::InvalidField {
            field: "acquisition_datetime",
            reason: format!("`{}` is not YYYY-MM-DD HH:MM:SS", raw_acquired),
        })?;

    let schedule_time = match doc.schedule_time {
        Some(raw) => Some(parse_time(&raw).ok_or_else(|| ValidationError::InvalidField {
            field: "schedule_time",
            reason: format!("`{}` is not HH:MM or HH:MM:SS", raw),
        })?),
        None => None,
    };

    let raw_platform = required_text("platform", doc.platform)?;
    let platform = canonical_platform(&raw_platform)
        .ok_or(ValidationError::UnknownPlatform(raw_platform))?
        .to_string();

    let capsule = match (doc.capsule_id, doc.mount) {
        (Some(capsule_id), Some(mount)) => Some(PipelineCapsule { capsule_id, mount }),
        (None, None) => None,
        _ => return Err(ValidationError::CapsuleWithoutMount),
    };

    let max_attempts = match doc.max_attempts {
        None => DEFAULT_MAX_ATTEMPTS,
        Some(n) if n >= 1 => u32::try_from(n).map_err(|_| ValidationError::InvalidField {
            field: "max_attempts",
            reason: format!("{} is too large", n),
        })?,
        Some(n) => {
            return Err(ValidationError::InvalidField {
                field: "max_attempts",
                reason: format!("must be at least 1, got {}", n),
            })
        }
    };

    let transfer_endpoint = match doc.transfer_endpoint {
        Some(url) => {
            let url = url.trim().to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ValidationError::InvalidField {
                    field: "transfer_endpoint",
                    reason: format!("`{}` is not an http(s) URL", url),
                });
            }
            url
        }
        None => DEFAULT_TRANSFER_ENDPOINT.to_string(),
    };

    let payload = build_payload(doc.modalities, doc.schemas, doc.script)?;

    Ok(ManifestSpec {
        name,
        processor_full_name,
        subject_id,
        acquisition_datetime,
        schedule_time,
        platform,
        capsule,
        s3_bucket: doc.s3_bucket,
        project_name,
        destination,
        payload,
        force_cloud_sync: doc.force_cloud_sync.unwrap_or(false),
        max_attempts,
        transfer_endpoint,
    })
}

fn build_payload(
    modalities: NamedLists,
    schemas: Vec<String>,
    script: NamedLists,
) -> Result<Payload, ValidationError> {
    if !script.is_empty() {
        if !modalities.is_empty() || !schemas.is_empty() {
            return Err(ValidationError::MixedPayload);
        }
        for (command, argv) in script.iter() {
            if argv.is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "script",
                    reason: format!("command `{}` has no arguments", command),
                });
            }
        }
        return Ok(Payload::Script { commands: script });
    }

    let mut canonical: Vec<(String, Vec<String>)> = Vec::with_capacity(modalities.len());
    for (modality, files) in modalities.0 {
        let known = canonical_modality(&modality)
            .ok_or_else(|| ValidationError::UnknownModality(modality.clone()))?;
        if canonical.iter().any(|(existing, _)| existing == known) {
            return Err(ValidationError::InvalidField {
                field: "modalities",
                reason: format!("modality `{}` listed twice", known),
            });
        }
        let files = files.iter().map(|f| normalize_path(f)).collect();
        canonical.push((known.to_string(), files));
    }

    Ok(Payload::Transfer {
        modalities: NamedLists(canonical),
        schemas: schemas.iter().map(|s| normalize_path(s)).collect(),
    })
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(_) => Err(ValidationError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }),
        None => Err(ValidationError::MissingField(field)),
    }
}

/// Rewrite a path to forward slashes
pub fn normalize_path(path: &str) -> String {
    path.trim().replace('\\', "/")
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Time of day as `HH:MM` or `HH:MM:SS[.f]`
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

impl ManifestSpec {
    /// Serialize back to manifest YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.to_document())
    }

    fn to_document(&self) -> ManifestDocument {
        let (modalities, schemas, script) = match &self.payload {
            Payload::Transfer {
                modalities,
                schemas,
            } => (modalities.clone(), schemas.clone(), NamedLists::default()),
            Payload::Script { commands } => (NamedLists::default(), Vec::new(), commands.clone()),
        };

        ManifestDocument {
            name: Some(self.name.clone()),
            processor_full_name: Some(self.processor_full_name.clone()),
            subject_id: Some(SubjectId::Text(self.subject_id.clone())),
            acquisition_datetime: Some(self.acquisition_datetime.format(DATETIME_OUT).to_string()),
            schedule_time: self
                .schedule_time
                .map(|t| t.format("%H:%M:%S%.f").to_string()),
            platform: Some(self.platform.clone()),
            capsule_id: self.capsule.as_ref().map(|c| c.capsule_id.clone()),
            mount: self.capsule.as_ref().map(|c| c.mount.clone()),
            s3_bucket: self.s3_bucket,
            project_name: Some(self.project_name.clone()),
            destination: Some(self.destination.clone()),
            modalities,
            schemas,
            script,
            force_cloud_sync: Some(self.force_cloud_sync),
            max_attempts: Some(i64::from(self.max_attempts)),
            transfer_endpoint: Some(self.transfer_endpoint.clone()),
        }
    }
}
