// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake script runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ScriptError, ScriptRunner};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Fake script runner that records argv lists
#[derive(Clone, Default)]
pub struct FakeScriptRunner {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    failing: Arc<Mutex<Vec<String>>>,
}

impl FakeScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get every argv run so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make runs of `program` exit non-zero
    pub fn fail_program(&self, program: impl Into<String>) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(program.into());
    }
}

#[async_trait]
impl ScriptRunner for FakeScriptRunner {
    async fn run(&self, argv: &[String]) -> Result<(), ScriptError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(argv.to_vec());

        let program = argv.first().ok_or(ScriptError::Empty)?;
        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if failing.contains(program) {
            return Err(ScriptError::Failed {
                program: program.clone(),
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}
