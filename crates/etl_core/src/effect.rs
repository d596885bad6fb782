use std::path::PathBuf;

use crate::{Launch, RunId, StageSchedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Cancel every outstanding stage timer and arm a fresh set for `run_id`.
    ArmStageTimers {
        run_id: RunId,
        schedule: StageSchedule,
    },
    /// Acquire a fresh run result.
    Restart,
    /// Write the given batch as CSV.
    ExportCsv { launches: Vec<Launch> },
}

/// What the engine reports back after a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub rows: usize,
    pub path: PathBuf,
}
