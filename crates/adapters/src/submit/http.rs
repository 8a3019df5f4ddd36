// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP submission over ureq

use super::{SubmitClient, SubmitError};
use async_trait::async_trait;
use std::time::Duration;
use wd_core::SubmitJobRequest;

pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking ureq client run on tokio's blocking pool
#[derive(Clone)]
pub struct HttpSubmitClient {
    agent: ureq::Agent,
}

impl HttpSubmitClient {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpSubmitClient {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_TIMEOUT)
    }
}

#[async_trait]
impl SubmitClient for HttpSubmitClient {
    async fn submit(&self, endpoint: &str, request: &SubmitJobRequest) -> Result<(), SubmitError> {
        let body =
            serde_json::to_value(request).map_err(|e| SubmitError::Transport(e.to_string()))?;
        let agent = self.agent.clone();
        let url = endpoint.to_string();

        tokio::task::spawn_blocking(move || {
            let mut response = agent
                .post(&url)
                .send_json(&body)
                .map_err(|e| SubmitError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            if status == 200 {
                return Ok(());
            }
            let text = response.body_mut().read_to_string().unwrap_or_default();
            Err(SubmitError::Status { status, body: text })
        })
        .await
        .map_err(|e| SubmitError::Transport(e.to_string()))?
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
