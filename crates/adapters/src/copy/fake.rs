// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake copy strategy for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CopyError, CopyStrategy};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded copy call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCall {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Fake copy strategy that records calls instead of copying
#[derive(Clone, Default)]
pub struct FakeCopyStrategy {
    calls: Arc<Mutex<Vec<CopyCall>>>,
    failing: Arc<Mutex<Vec<PathBuf>>>,
    delay: Arc<Mutex<Option<Duration>>>,
}

impl FakeCopyStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CopyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make copies of `source` fail with a non-zero exit
    pub fn fail_on(&self, source: impl Into<PathBuf>) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(source.into());
    }

    /// Make every copy take `delay` before returning
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap_or_else(|e| e.into_inner()) = Some(delay);
    }
}

#[async_trait]
impl CopyStrategy for FakeCopyStrategy {
    async fn copy(&self, source: &Path, dest: &Path) -> Result<(), CopyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CopyCall {
                source: source.to_path_buf(),
                dest: dest.to_path_buf(),
            });

        let delay = *self.delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if failing.iter().any(|p| p == source) {
            return Err(CopyError::Exit {
                tool: "fake",
                code: 23,
                path: source.display().to_string(),
                stderr: "some files could not be transferred".to_string(),
            });
        }

        Ok(())
    }
}
