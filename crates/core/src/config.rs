// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MISFIRE_GRACE_S: u64 = 3600;
pub const DEFAULT_DEBOUNCE_S: u64 = 10;
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for the watch service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Directory watched for manifests
    pub flag_dir: PathBuf,
    /// Directory finished manifests are moved into
    pub manifest_complete: PathBuf,
    /// Chat webhook for alerts; alerts are only logged without one
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default = "default_misfire_grace")]
    pub misfire_grace_time_s: u64,
    /// Settle time between a file event and reading the manifest
    #[serde(default = "default_debounce")]
    pub debounce_s: u64,
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_misfire_grace() -> u64 {
    DEFAULT_MISFIRE_GRACE_S
}

fn default_debounce() -> u64 {
    DEFAULT_DEBOUNCE_S
}

fn default_max_concurrent_jobs() -> usize {
    DEFAULT_MAX_CONCURRENT_JOBS
}

impl WatchConfig {
    /// Config with defaults for everything but the two directories
    pub fn new(flag_dir: impl Into<PathBuf>, manifest_complete: impl Into<PathBuf>) -> Self {
        Self {
            flag_dir: flag_dir.into(),
            manifest_complete: manifest_complete.into(),
            webhook_url: None,
            misfire_grace_time_s: DEFAULT_MISFIRE_GRACE_S,
            debounce_s: DEFAULT_DEBOUNCE_S,
            max_concurrent_jobs: DEFAULT_MAX_CONCURRENT_JOBS,
            log_dir: None,
        }
    }

    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Parse and validate YAML config text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: WatchConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Checks that need no filesystem access
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flag_dir.as_os_str().is_empty() {
            return Err(invalid("flag_dir", "must not be empty"));
        }
        if self.manifest_complete.as_os_str().is_empty() {
            return Err(invalid("manifest_complete", "must not be empty"));
        }
        if self.flag_dir == self.manifest_complete {
            return Err(invalid(
                "manifest_complete",
                "must differ from flag_dir",
            ));
        }
        if self.max_concurrent_jobs == 0 {
            return Err(invalid("max_concurrent_jobs", "must be at least 1"));
        }
        if let Some(url) = &self.webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(
                    "webhook_url",
                    &format!("`{}` is not an http(s) URL", url),
                ));
            }
        }
        Ok(())
    }

    pub fn misfire_grace(&self) -> Duration {
        Duration::from_secs(self.misfire_grace_time_s)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_secs(self.debounce_s)
    }

    /// One-line description for the startup log
    pub fn summary(&self) -> String {
        format!(
            "flag_dir={} manifest_complete={} webhook={} misfire_grace={} debounce={} workers={}",
            self.flag_dir.display(),
            self.manifest_complete.display(),
            if self.webhook_url.is_some() { "set" } else { "none" },
            humantime::format_duration(self.misfire_grace()),
            humantime::format_duration(self.debounce()),
            self.max_concurrent_jobs,
        )
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
