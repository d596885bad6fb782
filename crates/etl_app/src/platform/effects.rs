use engine_logging::{engine_info, engine_warn};
use etl_core::{Effect, ExportReceipt, Msg};
use etl_engine::{EngineConfig, EngineEvent, EngineHandle};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: EngineHandle::new(config),
        }
    }

    /// Kicks off the initial acquisition.
    pub fn start(&self) {
        self.engine.load();
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ArmStageTimers { run_id, schedule } => {
                    engine_logging::set_current_run(run_id);
                    engine_info!("Stage simulation started");
                    self.engine.arm_stages(run_id, schedule);
                }
                Effect::Restart => {
                    engine_info!("Restart requested");
                    self.engine.restart();
                }
                Effect::ExportCsv { launches } => {
                    engine_info!("Export requested for {} rows", launches.len());
                    self.engine.export(launches);
                }
            }
        }
    }

    /// Next engine event, already translated into a core message.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::RunLoaded(run) => Msg::RunLoaded(run),
        EngineEvent::RestartCompleted(Ok(run)) => Msg::RestartFinished(Ok(run)),
        EngineEvent::RestartCompleted(Err(err)) => {
            engine_warn!("Restart failed: {}", err);
            Msg::RestartFinished(Err(err.to_string()))
        }
        EngineEvent::RestartIgnored => Msg::RestartIgnored,
        EngineEvent::StageTimerFired { run_id, step } => Msg::StageTimerFired { run_id, step },
        EngineEvent::ExportCompleted(Ok(summary)) => {
            engine_info!("Exported {} rows to {:?}", summary.rows, summary.path);
            Msg::ExportFinished(Ok(ExportReceipt {
                rows: summary.rows,
                path: summary.path,
            }))
        }
        EngineEvent::ExportCompleted(Err(err)) => {
            engine_warn!("Export failed: {}", err);
            Msg::ExportFinished(Err(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use etl_engine::{ExportSummary, FailureKind, FetchError, RestartError};

    use super::*;

    #[test]
    fn restart_errors_become_display_text() {
        let err = RestartError::Endpoint(FetchError {
            kind: FailureKind::HttpStatus(500),
            message: "500 Internal Server Error".to_string(),
        });
        assert_eq!(
            map_event(EngineEvent::RestartCompleted(Err(err))),
            Msg::RestartFinished(Err(
                "control endpoint request failed: http status 500: 500 Internal Server Error"
                    .to_string()
            ))
        );
    }

    #[test]
    fn export_summary_becomes_receipt() {
        let summary = ExportSummary {
            rows: 4,
            path: PathBuf::from("exports/mini-etl-1.csv"),
        };
        assert_eq!(
            map_event(EngineEvent::ExportCompleted(Ok(summary))),
            Msg::ExportFinished(Ok(ExportReceipt {
                rows: 4,
                path: PathBuf::from("exports/mini-etl-1.csv"),
            }))
        );
    }

    #[test]
    fn timer_events_pass_through() {
        assert_eq!(
            map_event(EngineEvent::StageTimerFired { run_id: 3, step: 2 }),
            Msg::StageTimerFired { run_id: 3, step: 2 }
        );
    }
}
