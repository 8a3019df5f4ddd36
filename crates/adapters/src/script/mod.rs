// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User script execution

mod process;

pub use process::ProcessScriptRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeScriptRunner;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from running one script command
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("command has no program")]
    Empty,
    #[error("failed to start {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Runs one argv to completion
#[async_trait]
pub trait ScriptRunner: Clone + Send + Sync + 'static {
    /// Run `argv[0]` with the remaining arguments; success means exit status 0
    async fn run(&self, argv: &[String]) -> Result<(), ScriptError>;
}
