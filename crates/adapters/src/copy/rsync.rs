// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rsync copy strategy

use super::{run_tool, CopyError, CopyStrategy};
use async_trait::async_trait;
use std::path::Path;

/// Copies with `rsync`, keeping modification times
#[derive(Clone, Copy, Debug, Default)]
pub struct RsyncCopy;

impl RsyncCopy {
    pub fn new() -> Self {
        Self
    }
}

/// rsync reports any partial transfer with a non-zero code
pub fn rsync_succeeded(code: i32) -> bool {
    code == 0
}

pub fn rsync_args(source: &Path, dest: &Path, is_dir: bool) -> Vec<String> {
    let mut args = Vec::with_capacity(4);
    if is_dir {
        args.push("-r".to_string());
    }
    args.push("-t".to_string());
    args.push(source.display().to_string());
    args.push(dest.display().to_string());
    args
}

#[async_trait]
impl CopyStrategy for RsyncCopy {
    async fn copy(&self, source: &Path, dest: &Path) -> Result<(), CopyError> {
        let args = rsync_args(source, dest, source.is_dir());
        run_tool("rsync", args, source, rsync_succeeded).await
    }
}
