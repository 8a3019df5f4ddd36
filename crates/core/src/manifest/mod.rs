// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Manifest files: the on-disk description of one upload job

mod parser;
mod types;
pub mod vocab;

pub use parser::{normalize_path, parse_manifest, parse_manifest_str, parse_time, ValidationError};
pub use types::{
    ManifestSpec, NamedLists, Payload, PipelineCapsule, S3Bucket, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_TRANSFER_ENDPOINT,
};
