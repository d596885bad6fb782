use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use engine_logging::{engine_error, engine_info};
use etl_core::{Launch, RunId, StageSchedule};

use crate::controller::{RestartError, RestartRoute, RunController};
use crate::export::{write_csv_export, ExportError};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::timers::StageTimers;
use crate::types::{ChannelEventSink, EngineEvent, EventSink};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Source override; `None` means the built-in endpoint.
    pub source_url: Option<String>,
    pub restart_route: RestartRoute,
    pub fetch: FetchSettings,
    pub export_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            source_url: None,
            restart_route: RestartRoute::Local,
            fetch: FetchSettings::default(),
            export_dir,
        }
    }
}

enum EngineCommand {
    Load,
    Restart,
    ArmStages {
        run_id: RunId,
        schedule: StageSchedule,
    },
    Export {
        launches: Vec<Launch>,
    },
}

/// Front-end side of the engine: commands go in, events come out. All IO
/// and timers run on a tokio runtime owned by a background thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: EngineConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let controller = Arc::new(RunController::new(
                fetcher,
                config.source_url.as_deref(),
                config.restart_route.clone(),
            ));
            engine_info!("Engine started; source {}", controller.source_url());
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut timers = StageTimers::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ArmStages { run_id, schedule } => {
                        timers.arm(runtime.handle(), run_id, schedule, sink.clone());
                    }
                    command => {
                        runtime.spawn(handle_command(
                            controller.clone(),
                            config.export_dir.clone(),
                            command,
                            sink.clone(),
                        ));
                    }
                }
            }
            timers.cancel();
        });

        Self { cmd_tx, event_rx }
    }

    /// Starts the initial acquisition.
    pub fn load(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Load);
    }

    pub fn restart(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Restart);
    }

    pub fn arm_stages(&self, run_id: RunId, schedule: StageSchedule) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ArmStages { run_id, schedule });
    }

    pub fn export(&self, launches: Vec<Launch>) {
        let _ = self.cmd_tx.send(EngineCommand::Export { launches });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    controller: Arc<RunController>,
    export_dir: PathBuf,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        EngineCommand::Load => {
            let run = controller.run_once().await;
            sink.emit(EngineEvent::RunLoaded(run));
        }
        EngineCommand::Restart => {
            // A panic inside the restart must not take the engine down.
            let task = tokio::spawn(async move { controller.restart().await });
            let event = match task.await {
                Ok(Ok(Some(run))) => EngineEvent::RestartCompleted(Ok(run)),
                Ok(Ok(None)) => EngineEvent::RestartIgnored,
                Ok(Err(err)) => EngineEvent::RestartCompleted(Err(err)),
                Err(join_err) => {
                    engine_error!("Restart task failed: {}", join_err);
                    EngineEvent::RestartCompleted(Err(RestartError::Aborted(
                        join_err.to_string(),
                    )))
                }
            };
            sink.emit(event);
        }
        EngineCommand::Export { launches } => {
            let task = tokio::task::spawn_blocking(move || {
                write_csv_export(&export_dir, &launches, Utc::now())
            });
            let result = match task.await {
                Ok(result) => result,
                Err(join_err) => Err(ExportError::Aborted(join_err.to_string())),
            };
            sink.emit(EngineEvent::ExportCompleted(result));
        }
        EngineCommand::ArmStages { .. } => {}
    }
}
