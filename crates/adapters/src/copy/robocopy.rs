// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! robocopy copy strategy

use super::{run_tool, CopyError, CopyStrategy};
use async_trait::async_trait;
use std::path::Path;

/// Copies with `robocopy` in restartable, unbuffered mode
#[derive(Clone, Copy, Debug, Default)]
pub struct RobocopyCopy;

impl RobocopyCopy {
    pub fn new() -> Self {
        Self
    }
}

/// robocopy exit codes are a bitmask; 8 and above mean something failed
pub fn robocopy_succeeded(code: i32) -> bool {
    (0..8).contains(&code)
}

/// robocopy only accepts backslash separators
fn windows_path(path: &Path) -> String {
    path.display().to_string().replace('/', "\\")
}

pub fn robocopy_args(source: &Path, dest: &Path, is_dir: bool) -> Vec<String> {
    if is_dir {
        return vec![
            windows_path(source),
            windows_path(dest),
            "/z".to_string(),
            "/e".to_string(),
            "/j".to_string(),
            "/r:5".to_string(),
        ];
    }

    let parent = source.parent().map(windows_path).unwrap_or_default();
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    vec![
        parent,
        windows_path(dest),
        name,
        "/j".to_string(),
        "/r:5".to_string(),
    ]
}

#[async_trait]
impl CopyStrategy for RobocopyCopy {
    async fn copy(&self, source: &Path, dest: &Path) -> Result<(), CopyError> {
        let args = robocopy_args(source, dest, source.is_dir());
        run_tool("robocopy", args, source, robocopy_succeeded).await
    }
}
