#![deny(missing_docs)]
//! Shared logging utilities for the mini-ETL workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! tagged with the pipeline run that was current when it was logged.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide id of the pipeline run currently on screen.
static CURRENT_RUN: AtomicU64 = AtomicU64::new(0);

/// Records the id of the run whose stages are currently being simulated.
/// Called by the front end whenever a new run result is accepted.
pub fn set_current_run(run_id: u64) {
    CURRENT_RUN.store(run_id, Ordering::Relaxed);
}

/// Returns the id of the current run, or 0 before the first run is loaded.
pub fn current_run() -> u64 {
    CURRENT_RUN.load(Ordering::Relaxed)
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[run {}] {}", $crate::current_run(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
