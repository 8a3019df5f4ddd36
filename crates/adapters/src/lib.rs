// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod archive;
pub mod copy;
pub mod notify;
pub mod script;
pub mod submit;
pub mod traced;

pub use archive::{ArchiveError, Archiver, FsArchiver};
pub use copy::{platform_copy, CopyError, CopyStrategy, PlatformCopy, RobocopyCopy, RsyncCopy};
pub use notify::{NotifyAdapter, NotifyError, WebhookNotifier};
pub use script::{ProcessScriptRunner, ScriptError, ScriptRunner};
pub use submit::{HttpSubmitClient, SubmitClient, SubmitError};
pub use traced::{TracedCopyStrategy, TracedSubmitClient};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use archive::FakeArchiver;
#[cfg(any(test, feature = "test-support"))]
pub use copy::{CopyCall, FakeCopyStrategy};
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use script::FakeScriptRunner;
#[cfg(any(test, feature = "test-support"))]
pub use submit::{FakeSubmitClient, SubmitCall};
