// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data transfer service client

mod http;

pub use http::{HttpSubmitClient, DEFAULT_SUBMIT_TIMEOUT};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSubmitClient, SubmitCall};

use async_trait::async_trait;
use thiserror::Error;
use wd_core::SubmitJobRequest;

/// Errors from notifying the transfer service
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transfer service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
}

/// Announces staged data to the transfer service
#[async_trait]
pub trait SubmitClient: Clone + Send + Sync + 'static {
    /// POST the request; only HTTP 200 counts as accepted
    async fn submit(&self, endpoint: &str, request: &SubmitJobRequest) -> Result<(), SubmitError>;
}
