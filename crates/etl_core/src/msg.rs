#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// First acquisition finished; the pipeline has data to show.
    RunLoaded(crate::RunResult),
    /// User asked for a fresh run.
    RestartClicked,
    /// Engine finished a restart request. Errors are carried as display text.
    RestartFinished(Result<crate::RunResult, String>),
    /// The engine ignored a restart because another one was still in flight.
    RestartIgnored,
    /// A scheduled stage timer fired.
    StageTimerFired { run_id: crate::RunId, step: usize },
    /// User asked for a CSV export of the current batch.
    ExportClicked,
    /// Engine finished writing an export.
    ExportFinished(Result<crate::ExportReceipt, String>),
}
