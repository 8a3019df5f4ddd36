// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line flags and config resolution

use crate::lifecycle::LifecycleError;
use clap::Parser;
use std::path::PathBuf;
use wd_core::WatchConfig;

/// Environment variable naming the config file when no flags are given
pub const WATCH_CONFIG_ENV: &str = "WATCH_CONFIG";

#[derive(Debug, Parser)]
#[command(
    name = "wdd",
    version,
    about = "Watch a directory for manifests and stage their data"
)]
pub struct Args {
    /// YAML watch configuration; takes precedence over every other source
    #[arg(short = 'c', long)]
    pub config_path: Option<PathBuf>,

    /// Directory to watch for manifests
    #[arg(short = 'f', long, requires = "manifest_complete")]
    pub flag_dir: Option<PathBuf>,

    /// Directory finished manifests are moved into
    #[arg(short = 'm', long, requires = "flag_dir")]
    pub manifest_complete: Option<PathBuf>,

    /// Chat webhook for alerts
    #[arg(short = 'w', long)]
    pub webhook_url: Option<String>,

    /// Directory for the service log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Build the watch configuration.
    ///
    /// `--config-path` wins, then `-f`/`-m`, then the file named by `env_config`.
    /// `-w` and `--log-dir` override whatever the chosen source says.
    pub fn resolve(&self, env_config: Option<PathBuf>) -> Result<WatchConfig, LifecycleError> {
        let mut config = match (&self.config_path, &self.flag_dir, &self.manifest_complete) {
            (Some(path), _, _) => WatchConfig::load(path)?,
            (None, Some(flag_dir), Some(complete)) => WatchConfig::new(flag_dir, complete),
            _ => match env_config {
                Some(path) => WatchConfig::load(&path)?,
                None => return Err(LifecycleError::NoConfig),
            },
        };

        if let Some(url) = &self.webhook_url {
            config = config.with_webhook(url.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
