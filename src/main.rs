//! droid-study binary entrypoint kept minimal. Subcommands live in `app`.

use std::fmt;
use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use droid_study::app;
use droid_study::args::{Args, determine_log_level};

/// Local wall-clock timestamps for log lines.
struct StudyTimer;

impl tracing_subscriber::fmt::time::FormatTime for StudyTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Filter from `RUST_LOG`, else from the command-line level.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// Install the stderr subscriber.
fn init_stderr(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_timer(StudyTimer)
        .init();
}

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `level`: Fallback level when `RUST_LOG` is unset.
/// - `log_file`: Optional file to append to.
///
/// Details:
/// - A log file that cannot be opened falls back to stderr with a warning.
fn init_logging(level: &str, log_file: Option<&Path>) {
    let Some(path) = log_file else {
        init_stderr(level);
        return;
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(StudyTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        Err(e) => {
            init_stderr(level);
            tracing::warn!(error = %e, path = %path.display(), "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&determine_log_level(&args), args.log_file.as_deref());

    tracing::debug!(command = ?args.command, "droid-study starting");
    match app::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "droid-study failed");
            ExitCode::FAILURE
        }
    }
}
