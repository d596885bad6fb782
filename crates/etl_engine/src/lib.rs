//! Mini-ETL engine: source acquisition, stage timers, run control and export.
mod controller;
mod engine;
mod export;
mod fetch;
mod fixture;
mod persist;
mod source;
mod timers;
mod types;

pub use controller::{RestartError, RestartRoute, RunController};
pub use engine::{EngineConfig, EngineHandle};
pub use export::{
    export_filename, normalize_timestamp, to_delimited_text, write_csv_export, CsvColumn,
    ExportError, ExportSummary, EXPORT_COLUMNS,
};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use fixture::fallback_launches;
pub use persist::{ensure_export_dir, AtomicFileWriter, PersistError};
pub use source::{
    acquire, decode_batch, read_source, resolve_source_url, SourceOutcome, BATCH_LIMIT,
    DEFAULT_SOURCE_URL,
};
pub use timers::StageTimers;
pub use types::{ChannelEventSink, EngineEvent, EventSink, FailureKind, FetchError};
