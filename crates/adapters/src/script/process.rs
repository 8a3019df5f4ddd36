// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess-backed script runner

use super::{ScriptError, ScriptRunner};
use async_trait::async_trait;
use tokio::process::Command;

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessScriptRunner;

impl ProcessScriptRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptRunner for ProcessScriptRunner {
    async fn run(&self, argv: &[String]) -> Result<(), ScriptError> {
        let (program, args) = argv.split_first().ok_or(ScriptError::Empty)?;

        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|e| ScriptError::Spawn {
                program: program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ScriptError::Failed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!(
            program = %program,
            stdout_len = output.stdout.len(),
            "command finished"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
