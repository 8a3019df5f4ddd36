// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem archiver

use super::{ArchiveError, Archiver};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FsArchiver {
    archive_dir: PathBuf,
}

impl FsArchiver {
    pub fn new(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
        }
    }
}

fn io_error(op: &'static str, path: &Path, e: std::io::Error) -> ArchiveError {
    ArchiveError::Io {
        op,
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Copy, confirm the size, then remove the source
async fn copy_then_delete(source: &Path, target: &Path) -> Result<(), ArchiveError> {
    let expected = tokio::fs::metadata(source)
        .await
        .map_err(|e| io_error("stat", source, e))?
        .len();
    tokio::fs::copy(source, target)
        .await
        .map_err(|e| io_error("copy", source, e))?;
    let actual = tokio::fs::metadata(target)
        .await
        .map_err(|e| io_error("stat", target, e))?
        .len();
    if actual != expected {
        return Err(ArchiveError::SizeMismatch {
            path: target.to_path_buf(),
            expected,
            actual,
        });
    }
    tokio::fs::remove_file(source)
        .await
        .map_err(|e| io_error("remove", source, e))
}

#[async_trait]
impl Archiver for FsArchiver {
    async fn archive(&self, manifest: &Path) -> Result<PathBuf, ArchiveError> {
        let name = manifest.file_name().ok_or_else(|| ArchiveError::NoFileName {
            path: manifest.to_path_buf(),
        })?;
        let target = self.archive_dir.join(name);

        match tokio::fs::rename(manifest, &target).await {
            Ok(()) => Ok(target),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(io_error("move", manifest, e))
            }
            Err(e) => {
                // Rename fails across volumes and over existing files on Windows
                tracing::debug!(error = %e, "rename failed, copying instead");
                copy_then_delete(manifest, &target).await?;
                Ok(target)
            }
        }
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
