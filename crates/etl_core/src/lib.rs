//! Mini-ETL core: data model, metrics and the pure stage state machine.
mod effect;
mod metrics;
mod model;
mod msg;
mod stage;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ExportReceipt};
pub use metrics::compute_metrics;
pub use model::{source_host, Launch, LaunchStatus, Metrics, RunId, RunResult, NO_MISSION};
pub use msg::Msg;
pub use stage::{StageBoard, StageKind, StageSchedule, StageStatus, STAGE_COUNT};
pub use state::PipelineState;
pub use update::update;
pub use view_model::{LaunchRowView, PipelineViewModel, Provenance, StagePillView};
