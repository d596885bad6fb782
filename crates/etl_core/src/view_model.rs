use chrono::{DateTime, Utc};

use crate::{LaunchStatus, Metrics, RunId, StageStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineViewModel {
    pub run_id: RunId,
    pub stages: Vec<StagePillView>,
    /// `None` until the first run has loaded.
    pub metrics: Option<Metrics>,
    pub log_lines: Vec<String>,
    /// Newest first.
    pub launches: Vec<LaunchRowView>,
    pub provenance: Option<Provenance>,
    pub restarting: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePillView {
    pub name: &'static str,
    pub status: StageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRowView {
    pub id: String,
    pub name: String,
    pub date_utc: Option<String>,
    pub status: LaunchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    /// False when the offline fixture stood in for the live source.
    pub live: bool,
    pub source_host: String,
    pub fetched_at: DateTime<Utc>,
}

impl Provenance {
    pub fn badge(&self) -> &'static str {
        if self.live {
            "LIVE API"
        } else {
            "DEMO DATA"
        }
    }
}
