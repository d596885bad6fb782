use std::fmt;

use etl_core::{RunId, RunResult};

use crate::controller::RestartError;
use crate::export::{ExportError, ExportSummary};

/// Everything the engine reports back to the front end.
#[derive(Debug)]
pub enum EngineEvent {
    /// Initial acquisition finished. Never fails: the fixture stands in.
    RunLoaded(RunResult),
    RestartCompleted(Result<RunResult, RestartError>),
    /// A restart was requested while another one was still in flight.
    RestartIgnored,
    StageTimerFired {
        run_id: RunId,
        step: usize,
    },
    ExportCompleted(Result<ExportSummary, ExportError>),
}

/// Receives engine events. Implemented over channels by the front end and
/// by tests.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    MalformedPayload,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
        }
    }
}
