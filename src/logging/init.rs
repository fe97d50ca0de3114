use std::{path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// File name prefix of the rolling log written when file logging is enabled.
pub const LOG_FILE_NAME: &str = "dummyfiles.log";

// Global guard to keep the file appender alive
static FILE_APPENDER_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);

/// Flush and close the log file appender.
/// Must run before `process::exit`, which skips destructors.
pub fn flush_logs() {
    // Taking the guard drops it, which flushes pending lines
    if let Ok(mut guard_holder) = FILE_APPENDER_GUARD.lock()
        && let Some(guard) = guard_holder.take()
    {
        drop(guard);
    }
}

fn base_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Pick the filter: a valid `rust_log` wins, anything else falls back to the
/// verbosity level. The second value is a note to log once tracing is up.
fn select_filter(verbosity: u8, rust_log: Option<&str>) -> (EnvFilter, Option<String>) {
    let base = base_level(verbosity);
    match rust_log {
        Some(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(err) => (
                EnvFilter::new(base),
                Some(format!(
                    "ignoring invalid RUST_LOG {directives:?} ({err}); using {base}"
                )),
            ),
        },
        None => (EnvFilter::new(base), None),
    }
}

fn filter_for(verbosity: u8) -> (EnvFilter, Option<String>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    select_filter(verbosity, rust_log.as_deref())
}

/// Initialize tracing on stderr. RUST_LOG (if set and valid) takes precedence.
/// Otherwise, -v/-vv map to "debug"/"trace".
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{fmt, prelude::*};

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let (filter_layer, note) = filter_for(verbosity);

    // Allow re-init to be a no-op in tests
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();

    if let Some(note) = note {
        tracing::warn!("{note}");
    }
}

/// Initialize tracing on stderr plus a daily rolling file in `log_dir`.
///
/// # Errors
/// Returns an error if `log_dir` cannot be created; no subscriber is
/// installed in that case.
pub fn init_tracing_with_file(log_dir: &Path, verbosity: u8) -> Result<()> {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*};

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let (filter_layer, note) = filter_for(verbosity);
    let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    if let Ok(mut guard_holder) = FILE_APPENDER_GUARD.lock() {
        *guard_holder = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(non_blocking);
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    if let Some(note) = note {
        tracing::warn!("{note}");
    }
    Ok(())
}
