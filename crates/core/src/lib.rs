// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wd-core: manifest model and pure logic for the manifest watchdog
//!
//! This crate provides:
//! - Manifest parsing and validation
//! - Job state machine and trigger-time computation
//! - Watch configuration, alerts and the transfer-service request model

pub mod alert;
pub mod clock;
pub mod config;
pub mod fs_event;
pub mod id;
pub mod job;
pub mod manifest;
pub mod submit;
pub mod trigger;

pub use alert::{Alert, AlertLevel};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, WatchConfig};
pub use fs_event::{is_manifest_name, FsEvent, FsEventKind};
pub use id::{IdGen, JobId, SequentialIdGen, UuidIdGen};
pub use job::{JobEvent, JobStage, JobState, JobSummary};
pub use manifest::{parse_manifest, parse_manifest_str, ManifestSpec, Payload, ValidationError};
pub use submit::SubmitJobRequest;
pub use trigger::compute_trigger;
