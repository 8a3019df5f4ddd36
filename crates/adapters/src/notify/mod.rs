// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert delivery adapters

mod webhook;

pub use webhook::{teams_card, WebhookNotifier};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeNotifyAdapter;

use async_trait::async_trait;
use thiserror::Error;
use wd_core::Alert;

/// Errors from alert delivery; never fatal to a job
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook returned HTTP {0}")]
    Status(u16),
    #[error("webhook request failed: {0}")]
    Transport(String),
}

/// Adapter for delivering alerts
#[async_trait]
pub trait NotifyAdapter: Clone + Send + Sync + 'static {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}

/// An absent notifier drops alerts
#[async_trait]
impl<N: NotifyAdapter> NotifyAdapter for Option<N> {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        match self {
            Some(inner) => inner.send(alert).await,
            None => Ok(()),
        }
    }
}
