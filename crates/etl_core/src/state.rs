use crate::stage::{StageBoard, StageKind, StageSchedule};
use crate::view_model::{LaunchRowView, PipelineViewModel, Provenance, StagePillView};
use crate::{RunId, RunResult};

/// Everything the front end shows, owned by the pure update loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipelineState {
    run: Option<RunResult>,
    run_id: RunId,
    schedule: StageSchedule,
    board: StageBoard,
    log: Vec<String>,
    restarting: bool,
    dirty: bool,
}

impl PipelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(schedule: StageSchedule) -> Self {
        Self {
            schedule,
            ..Self::default()
        }
    }

    pub fn run(&self) -> Option<&RunResult> {
        self.run.as_ref()
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn schedule(&self) -> StageSchedule {
        self.schedule
    }

    pub fn is_restarting(&self) -> bool {
        self.restarting
    }

    pub fn stages_finished(&self) -> bool {
        self.run.is_some() && self.board.is_terminal()
    }

    pub fn view(&self) -> PipelineViewModel {
        let stages = StageKind::ALL
            .iter()
            .zip(self.board.statuses().iter())
            .map(|(kind, status)| StagePillView {
                name: kind.name(),
                status: *status,
            })
            .collect();

        let (metrics, launches, provenance) = match &self.run {
            Some(run) => (
                Some(run.metrics.clone()),
                run.launches
                    .iter()
                    .rev()
                    .map(|launch| LaunchRowView {
                        id: launch.id.clone(),
                        name: launch.name.clone(),
                        date_utc: launch.date_utc.clone(),
                        status: launch.status(),
                    })
                    .collect(),
                Some(Provenance {
                    live: !run.fallback_used,
                    source_host: run.origin_label(),
                    fetched_at: run.fetched_at,
                }),
            ),
            None => (None, Vec::new(), None),
        };

        PipelineViewModel {
            run_id: self.run_id,
            stages,
            metrics,
            log_lines: self.log.clone(),
            launches,
            provenance,
            restarting: self.restarting,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Replaces the current run and resets the stage board. The returned id
    /// invalidates every timer armed for earlier runs.
    pub(crate) fn accept_run(&mut self, run: RunResult) -> RunId {
        self.run_id += 1;
        self.board = StageBoard::for_run(&run);
        self.log.clear();
        self.run = Some(run);
        self.dirty = true;
        self.run_id
    }

    pub(crate) fn apply_stage_step(&mut self, run_id: RunId, step: usize) -> bool {
        if run_id != self.run_id || self.run.is_none() {
            return false;
        }
        match self.board.advance(step) {
            Some(lines) => {
                self.log.extend(lines);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Marks a restart as in flight. Returns false if one already is.
    pub(crate) fn begin_restart(&mut self) -> bool {
        if self.restarting {
            return false;
        }
        self.restarting = true;
        self.dirty = true;
        true
    }

    pub(crate) fn end_restart(&mut self) {
        self.restarting = false;
        self.dirty = true;
    }

    pub(crate) fn push_log(&mut self, line: String) {
        self.log.push(line);
        self.dirty = true;
    }
}
