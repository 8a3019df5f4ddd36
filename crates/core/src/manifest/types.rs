// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated manifest types

use chrono::{NaiveDateTime, NaiveTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Endpoint used when a manifest does not name one
pub const DEFAULT_TRANSFER_ENDPOINT: &str = "http://aind-data-transfer-service/api/v1/submit_jobs";

/// Attempt budget used when a manifest does not name one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// An ordered `name -> [string]` mapping.
///
/// YAML mappings are read in document order, which is the order modalities
/// are copied and script commands are run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedLists(pub Vec<(String, Vec<String>)>);

impl NamedLists {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for NamedLists {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, values) in &self.0 {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NamedLists {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NamedListsVisitor;

        impl<'de> Visitor<'de> for NamedListsVisitor {
            type Value = NamedLists;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of names to lists of strings")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(NamedLists::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Vec<String>)> = Vec::new();
                while let Some((name, values)) = access.next_entry::<String, Vec<String>>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(serde::de::Error::custom(format!("duplicate key `{}`", name)));
                    }
                    entries.push((name, values));
                }
                Ok(NamedLists(entries))
            }
        }

        deserializer.deserialize_any(NamedListsVisitor)
    }
}

/// Storage bucket class the data is uploaded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum S3Bucket {
    S3,
    Public,
    Private,
    Scratch,
}

impl fmt::Display for S3Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            S3Bucket::S3 => "s3",
            S3Bucket::Public => "public",
            S3Bucket::Private => "private",
            S3Bucket::Scratch => "scratch",
        };
        write!(f, "{}", s)
    }
}

/// Downstream processing pipeline to launch after upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineCapsule {
    pub capsule_id: String,
    pub mount: String,
}

/// What a job does before notifying the transfer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    /// Copy files to the staging destination
    Transfer {
        /// modality -> source files or directories
        modalities: NamedLists,
        /// Metadata files copied next to the modality folders
        schemas: Vec<String>,
    },
    /// Run user commands instead of copying
    Script {
        /// command name -> argv
        commands: NamedLists,
    },
}

/// The validated description of one unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSpec {
    pub name: String,
    pub processor_full_name: String,
    pub subject_id: String,
    pub acquisition_datetime: NaiveDateTime,
    pub schedule_time: Option<NaiveTime>,
    pub platform: String,
    pub capsule: Option<PipelineCapsule>,
    pub s3_bucket: Option<S3Bucket>,
    pub project_name: String,
    pub destination: String,
    pub payload: Payload,
    pub force_cloud_sync: bool,
    pub max_attempts: u32,
    pub transfer_endpoint: String,
}

impl ManifestSpec {
    /// `destination/name`, the folder this job stages into
    pub fn job_dir(&self) -> String {
        join_slash(&self.destination, &self.name)
    }

    /// `destination/name/modality`
    pub fn modality_dir(&self, modality: &str) -> String {
        join_slash(&self.job_dir(), modality)
    }

    pub fn is_script(&self) -> bool {
        matches!(self.payload, Payload::Script { .. })
    }

    /// Modalities of a transfer job; empty for script jobs
    pub fn modalities(&self) -> &[(String, Vec<String>)] {
        match &self.payload {
            Payload::Transfer { modalities, .. } => &modalities.0,
            Payload::Script { .. } => &[],
        }
    }
}

/// Join with exactly one `/` between the parts
pub(crate) fn join_slash(base: &str, child: &str) -> String {
    if base.is_empty() {
        return child.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), child.trim_start_matches('/'))
}
