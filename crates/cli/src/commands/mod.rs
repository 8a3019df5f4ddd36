// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod check;
pub mod run;
pub mod submit;
pub mod trigger;

use anyhow::Context;
use std::path::Path;
use wd_core::{parse_manifest, ManifestSpec};

/// Read and validate a manifest file
pub fn load_manifest(path: &Path) -> anyhow::Result<ManifestSpec> {
    let bytes =
        std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    parse_manifest(&bytes).with_context(|| format!("invalid manifest {}", path.display()))
}
