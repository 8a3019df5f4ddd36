// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake archiver for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ArchiveError, Archiver};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fake archiver that records paths and leaves files in place
#[derive(Clone, Default)]
pub struct FakeArchiver {
    calls: Arc<Mutex<Vec<PathBuf>>>,
    failing: Arc<Mutex<bool>>,
}

impl FakeArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every manifest archived so far
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = failing;
    }
}

#[async_trait]
impl Archiver for FakeArchiver {
    async fn archive(&self, manifest: &Path) -> Result<PathBuf, ArchiveError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(manifest.to_path_buf());
        if *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(ArchiveError::Io {
                op: "move",
                path: manifest.to_path_buf(),
                message: "permission denied".to_string(),
            });
        }
        Ok(PathBuf::from("/archive").join(manifest.file_name().unwrap_or_default()))
    }
}
