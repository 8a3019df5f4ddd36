// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::copy::{CopyError, CopyStrategy};
use crate::submit::{SubmitClient, SubmitError};
use async_trait::async_trait;
use tracing::Instrument;
use std::path::Path;
use wd_core::SubmitJobRequest;

/// Wrapper that adds tracing to any CopyStrategy
#[derive(Clone)]
pub struct TracedCopyStrategy<C> {
    inner: C,
}

impl<C> TracedCopyStrategy<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: CopyStrategy> CopyStrategy for TracedCopyStrategy<C> {
    async fn copy(&self, source: &Path, dest: &Path) -> Result<(), CopyError> {
        let span = tracing::info_span!(
            "copy",
            source = %source.display(),
            dest = %dest.display()
        );

        async move {
            tracing::info!(is_dir = source.is_dir(), "starting");

            let start = std::time::Instant::now();
            let result = self.inner.copy(source, dest).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "copied"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "copy failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any SubmitClient
#[derive(Clone)]
pub struct TracedSubmitClient<S> {
    inner: S,
}

impl<S> TracedSubmitClient<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: SubmitClient> SubmitClient for TracedSubmitClient<S> {
    async fn submit(&self, endpoint: &str, request: &SubmitJobRequest) -> Result<(), SubmitError> {
        let span = tracing::info_span!("submit", endpoint);

        async move {
            tracing::info!(jobs = request.upload_jobs.len(), "posting");

            let start = std::time::Instant::now();
            let result = self.inner.submit(endpoint, request).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "accepted"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "submit failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
