use std::time::Duration;

use crate::model::RunResult;

pub const STAGE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Extract,
    Transform,
    Load,
}

impl StageKind {
    pub const ALL: [StageKind; STAGE_COUNT] =
        [StageKind::Extract, StageKind::Transform, StageKind::Load];

    pub fn name(self) -> &'static str {
        match self {
            StageKind::Extract => "extract",
            StageKind::Transform => "transform",
            StageKind::Load => "load",
        }
    }

    /// The log line this stage contributes for `run`.
    pub fn log_line(self, run: &RunResult) -> String {
        let metrics = &run.metrics;
        match self {
            StageKind::Extract => {
                let origin = if run.fallback_used {
                    "demo data".to_string()
                } else {
                    run.origin_label()
                };
                format!(
                    "Extract ▸ fetched {} launches ({})",
                    run.launches.len(),
                    origin
                )
            }
            StageKind::Transform => format!(
                "Transform ▸ kept {} successful missions, removed {}",
                metrics.rows_out, metrics.dedup_removed
            ),
            StageKind::Load => format!(
                "Load ▸ data ready. Last mission: {}",
                metrics.last_mission
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageStatus {
    #[default]
    Pending,
    Active,
    Done,
}

/// Offsets, relative to arming, at which each step fires.
///
/// Step `k < STAGE_COUNT` makes stage `k` active; the final step marks every
/// stage done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSchedule {
    pub offsets: [Duration; STAGE_COUNT + 1],
}

impl Default for StageSchedule {
    fn default() -> Self {
        Self {
            offsets: [
                Duration::from_millis(200),
                Duration::from_millis(1200),
                Duration::from_millis(2200),
                Duration::from_millis(3200),
            ],
        }
    }
}

impl StageSchedule {
    pub fn steps(&self) -> impl Iterator<Item = (usize, Duration)> + '_ {
        self.offsets.iter().copied().enumerate()
    }
}

/// Stage statuses for one run plus the log lines its steps will emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBoard {
    statuses: [StageStatus; STAGE_COUNT],
    lines: Vec<String>,
    emitted: usize,
    last_step: Option<usize>,
}

impl Default for StageBoard {
    fn default() -> Self {
        Self::for_lines(Vec::new())
    }
}

impl StageBoard {
    /// Initial board for `run`: first stage active, the rest pending.
    pub fn for_run(run: &RunResult) -> Self {
        let lines = StageKind::ALL
            .iter()
            .map(|kind| kind.log_line(run))
            .collect();
        Self::for_lines(lines)
    }

    fn for_lines(lines: Vec<String>) -> Self {
        let mut statuses = [StageStatus::Pending; STAGE_COUNT];
        statuses[0] = StageStatus::Active;
        Self {
            statuses,
            lines,
            emitted: 0,
            last_step: None,
        }
    }

    pub fn statuses(&self) -> &[StageStatus; STAGE_COUNT] {
        &self.statuses
    }

    pub fn is_terminal(&self) -> bool {
        self.statuses.iter().all(|status| *status == StageStatus::Done)
    }

    /// Applies a schedule step and returns the log lines it makes due.
    ///
    /// Returns `None` when the step is unknown or does not move forward.
    pub fn advance(&mut self, step: usize) -> Option<Vec<String>> {
        if step > STAGE_COUNT {
            return None;
        }
        if self.last_step.is_some_and(|last| step <= last) {
            return None;
        }
        self.last_step = Some(step);

        for (idx, status) in self.statuses.iter_mut().enumerate() {
            *status = if idx < step {
                StageStatus::Done
            } else if idx == step {
                StageStatus::Active
            } else {
                StageStatus::Pending
            };
        }

        let due = (step + 1).min(STAGE_COUNT).min(self.lines.len());
        let fresh = if due > self.emitted {
            self.lines[self.emitted..due].to_vec()
        } else {
            Vec::new()
        };
        self.emitted = self.emitted.max(due);
        Some(fresh)
    }
}
