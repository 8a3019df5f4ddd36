// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Manifest watch service (wdd)
//!
//! Watches a flag directory for manifest files and runs one job per manifest.

pub mod args;
pub mod lifecycle;
pub mod watcher;

pub use args::{Args, WATCH_CONFIG_ENV};
pub use lifecycle::{startup, Daemon, LifecycleError};
pub use watcher::{translate, DirWatcher};
