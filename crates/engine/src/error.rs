// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for job execution

use thiserror::Error;
use wd_adapters::{ArchiveError, CopyError, ScriptError, SubmitError};

/// Errors that end a job
#[derive(Debug, Error)]
pub enum JobError {
    #[error("source does not exist: {0}")]
    MissingSource(String),
    #[error("could not create {path}: {message}")]
    CreateDir { path: String, message: String },
    #[error("copy failed: {0}")]
    Copy(#[from] CopyError),
    #[error("script {command} failed: {error}")]
    Script { command: String, error: ScriptError },
    #[error("could not trigger transfer service: {0}")]
    Submit(#[from] SubmitError),
    #[error("archive failed: {0}")]
    Archive(#[from] ArchiveError),
    #[error("cancelled")]
    Cancelled,
}
