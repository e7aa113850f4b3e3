use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SourceType;

/// Lifecycle of a collection job. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Processing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobLogEntry {
    pub time: DateTime<Utc>,
    pub msg: String,
}

/// One collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub area_name: String,
    pub municipality_code: Option<String>,
    pub status: JobStatus,
    pub collected_count: u32,
    pub processed_count: u32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub logs: Vec<JobLogEntry>,
}

/// Audit row for one raw sighting of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSnapshot {
    pub job_id: String,
    pub source_type: SourceType,
    pub source_url: Option<String>,
    pub raw_data: serde_json::Value,
}

/// What a finished job reports back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: String,
    pub area_name: String,
    pub collected_count: u32,
    pub processed_count: u32,
    pub new_shops: u32,
    pub updates: u32,
}
