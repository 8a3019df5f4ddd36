// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform copy tools

mod robocopy;
mod rsync;

pub use robocopy::{robocopy_args, robocopy_succeeded, RobocopyCopy};
pub use rsync::{rsync_args, rsync_succeeded, RsyncCopy};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CopyCall, FakeCopyStrategy};

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// Errors from copy operations
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("failed to start {tool}: {message}")]
    Spawn { tool: &'static str, message: String },
    #[error("{tool} exited with code {code} copying {path}: {stderr}")]
    Exit {
        tool: &'static str,
        code: i32,
        path: String,
        stderr: String,
    },
    #[error("{tool} was killed copying {path}")]
    Killed { tool: &'static str, path: String },
}

/// Copies one file or directory into a destination directory
#[async_trait]
pub trait CopyStrategy: Clone + Send + Sync + 'static {
    /// Copy `source` into the directory `dest`.
    ///
    /// Directories are copied recursively. `dest` must already exist.
    async fn copy(&self, source: &Path, dest: &Path) -> Result<(), CopyError>;
}

/// The copy tool for the platform this binary was built for
#[cfg(windows)]
pub type PlatformCopy = RobocopyCopy;
#[cfg(not(windows))]
pub type PlatformCopy = RsyncCopy;

pub fn platform_copy() -> PlatformCopy {
    PlatformCopy::default()
}

/// Run a copy tool and classify its exit code
async fn run_tool(
    tool: &'static str,
    args: Vec<String>,
    path: &Path,
    succeeded: fn(i32) -> bool,
) -> Result<(), CopyError> {
    let output = Command::new(tool)
        .args(&args)
        .output()
        .await
        .map_err(|e| CopyError::Spawn {
            tool,
            message: e.to_string(),
        })?;

    match output.status.code() {
        Some(code) if succeeded(code) => Ok(()),
        Some(code) => Err(CopyError::Exit {
            tool,
            code,
            path: path.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        None => Err(CopyError::Killed {
            tool,
            path: path.display().to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "copy_tests.rs"]
mod tests;
