// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Moving finished manifests out of the watched directory

mod fs;

pub use fs::FsArchiver;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeArchiver;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from archiving a manifest
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{path} has no file name")]
    NoFileName { path: PathBuf },
    #[error("could not {op} {path}: {message}")]
    Io {
        op: &'static str,
        path: PathBuf,
        message: String,
    },
    #[error("copy of {path} is {actual} bytes, expected {expected}")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}

/// Moves a finished manifest into the archive directory
#[async_trait]
pub trait Archiver: Clone + Send + Sync + 'static {
    /// Returns the manifest's new location
    async fn archive(&self, manifest: &Path) -> Result<PathBuf, ArchiveError>;
}
