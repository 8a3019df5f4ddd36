// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing alerts sent to the chat webhook

use serde::{Deserialize, Serialize};

/// Alert severity, used to pick the log level when delivery is skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Error,
}

/// A short title plus optional detail (path, command, HTTP status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub detail: Option<String>,
    pub level: AlertLevel,
}

impl Alert {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
            level: AlertLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: None,
            level: AlertLevel::Error,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn job_started(manifest: &str) -> Self {
        Self::info("Job started").with_detail(manifest)
    }

    pub fn job_complete(manifest: &str) -> Self {
        Self::info("Job complete").with_detail(manifest)
    }

    pub fn copy_failed(manifest: &str, error: &str) -> Self {
        Self::error("Could not copy data to destination")
            .with_detail(format!("{}: {}", manifest, error))
    }

    pub fn submit_failed(job: &str, error: &str) -> Self {
        Self::error("Could not trigger aind-data-transfer-service")
            .with_detail(format!("{}: {}", job, error))
    }

    pub fn script_succeeded(command: &str, job: &str) -> Self {
        Self::info(format!("Script {} succeeded", command)).with_detail(job)
    }

    pub fn script_failed(command: &str, job: &str, error: &str) -> Self {
        Self::error(format!("Script {} failed", command))
            .with_detail(format!("{}: {}", job, error))
    }

    pub fn validation_failed(path: &str, error: &str) -> Self {
        Self::error("Manifest validation failed").with_detail(format!("{}: {}", path, error))
    }

    pub fn misfired(path: &str, late_by: std::time::Duration) -> Self {
        Self::error("Job misfired").with_detail(format!(
            "{} started {} after its scheduled time",
            path,
            humantime::format_duration(std::time::Duration::from_secs(late_by.as_secs()))
        ))
    }

    pub fn archive_failed(path: &str, error: &str) -> Self {
        Self::error("Could not archive manifest").with_detail(format!("{}: {}", path, error))
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.title, detail),
            None => write!(f, "{}", self.title),
        }
    }
}
