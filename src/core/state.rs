//! Stage execution records

use crate::core::Stage;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Terminal status of a stage that ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Succeeded,
    Failed,
}

/// What happened to a single stage during a run
#[derive(Debug, Clone, Serialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub status: StageStatus,
    /// Final display title, or the error message for a failed stage
    pub title: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StageRecord {
    pub fn succeeded(stage: Stage, title: String, started_at: DateTime<Utc>) -> Self {
        Self {
            stage,
            status: StageStatus::Succeeded,
            title,
            started_at,
            finished_at: Utc::now(),
        }
    }

    pub fn failed(stage: Stage, error: String, started_at: DateTime<Utc>) -> Self {
        Self {
            stage,
            status: StageStatus::Failed,
            title: error,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Wall-clock time the stage took
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.signed_duration_since(self.started_at)
    }
}
