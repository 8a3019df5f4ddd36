// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job state machine
//!
//! A job is the tracked execution of one manifest. The registry owns the
//! handle and drives it through these states; the runner reports progress
//! through [`JobStage`].

use crate::id::JobId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason recorded when a job starts too long after its fire time
pub const MISFIRED: &str = "misfired";

/// The state of a tracked job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// Waiting for its fire time or a worker permit
    Scheduled,
    /// Runner is executing the pipeline
    Running,
    Completed,
    Failed { reason: String },
    Cancelled,
}

/// Events that move a job between states
#[derive(Debug, Clone)]
pub enum JobEvent {
    /// Worker picked the job up
    Start,
    Complete,
    Fail { reason: String },
    /// Superseded, deleted, or shut down
    Cancel,
    /// Fire time passed more than the grace period ago
    Misfire,
}

impl JobState {
    /// Pure transition function.
    ///
    /// Events that do not apply to the current state leave it unchanged.
    /// Terminal states never change.
    pub fn transition(&self, event: JobEvent) -> JobState {
        match (self, event) {
            (JobState::Scheduled, JobEvent::Start) => JobState::Running,
            (JobState::Scheduled, JobEvent::Misfire) => JobState::Failed {
                reason: MISFIRED.to_string(),
            },
            (JobState::Scheduled | JobState::Running, JobEvent::Cancel) => JobState::Cancelled,
            (JobState::Running, JobEvent::Complete) => JobState::Completed,
            (JobState::Scheduled | JobState::Running, JobEvent::Fail { reason }) => {
                JobState::Failed { reason }
            }
            (state, _) => state.clone(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed { .. } | JobState::Cancelled
        )
    }

    pub fn is_live(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether the registry keeps the handle after the job ends
    pub fn is_retained(&self) -> bool {
        !matches!(self, JobState::Completed | JobState::Cancelled)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Scheduled => write!(f, "scheduled"),
            JobState::Running => write!(f, "running"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed { reason } => write!(f, "failed: {}", reason),
            JobState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Pipeline position of a running job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    Pending,
    Executing,
    Notifying,
    Archiving,
    Done,
}

impl JobStage {
    pub fn as_str(self) -> &'static str {
        match self {
            JobStage::Pending => "pending",
            JobStage::Executing => "executing",
            JobStage::Notifying => "notifying",
            JobStage::Archiving => "archiving",
            JobStage::Done => "done",
        }
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub path: String,
    pub id: JobId,
    #[serde(flatten)]
    pub state: JobState,
    pub fire_at: NaiveDateTime,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
