// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Watchdog job engine: scheduling, execution and dispatch of manifest jobs

mod alerts;
mod dispatcher;
mod error;
mod executor;
mod registry;
mod runner;

#[cfg(test)]
mod test_support;

pub use dispatcher::Dispatcher;
pub use error::JobError;
pub use executor::Executor;
pub use registry::{At, JobHandle, JobRegistry, RegistryConfig};
pub use runner::{JobDeps, JobRunner, RunJob};
