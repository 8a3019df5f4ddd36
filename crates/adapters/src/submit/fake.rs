// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake submission client for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{SubmitClient, SubmitError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wd_core::SubmitJobRequest;

/// Recorded submission
#[derive(Debug, Clone)]
pub struct SubmitCall {
    pub endpoint: String,
    pub request: SubmitJobRequest,
}

/// Fake client answering with a configurable HTTP status
#[derive(Clone)]
pub struct FakeSubmitClient {
    calls: Arc<Mutex<Vec<SubmitCall>>>,
    status: Arc<Mutex<u16>>,
}

impl Default for FakeSubmitClient {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            status: Arc::new(Mutex::new(200)),
        }
    }
}

impl FakeSubmitClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded submissions
    pub fn calls(&self) -> Vec<SubmitCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Status returned by subsequent submissions
    pub fn respond_with(&self, status: u16) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

#[async_trait]
impl SubmitClient for FakeSubmitClient {
    async fn submit(&self, endpoint: &str, request: &SubmitJobRequest) -> Result<(), SubmitError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SubmitCall {
                endpoint: endpoint.to_string(),
                request: request.clone(),
            });

        let status = *self.status.lock().unwrap_or_else(|e| e.into_inner());
        if status == 200 {
            Ok(())
        } else {
            Err(SubmitError::Status {
                status,
                body: String::new(),
            })
        }
    }
}
