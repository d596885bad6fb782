use std::sync::Arc;

use engine_logging::engine_debug;
use etl_core::{RunId, StageSchedule};
use tokio::runtime::Handle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink};

/// The one live set of stage timers. Arming a new set cancels the old one
/// before anything new is scheduled.
#[derive(Debug, Default)]
pub struct StageTimers {
    current: Option<(RunId, CancellationToken)>,
}

impl StageTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn armed_run(&self) -> Option<RunId> {
        self.current.as_ref().map(|(run_id, _)| *run_id)
    }

    pub fn arm(
        &mut self,
        handle: &Handle,
        run_id: RunId,
        schedule: StageSchedule,
        sink: Arc<dyn EventSink>,
    ) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let start = Instant::now();
        handle.spawn(async move {
            for (step, offset) in schedule.steps() {
                tokio::select! {
                    _ = child.cancelled() => return,
                    _ = sleep_until(start + offset) => {}
                }
                sink.emit(EngineEvent::StageTimerFired { run_id, step });
            }
        });

        engine_debug!("Armed stage timers for run {}", run_id);
        self.current = Some((run_id, token));
    }

    pub fn cancel(&mut self) {
        if let Some((run_id, token)) = self.current.take() {
            token.cancel();
            engine_debug!("Cancelled stage timers for run {}", run_id);
        }
    }
}

impl Drop for StageTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}
