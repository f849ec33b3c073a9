//! File logging with daily rotation.
//!
//! Log lines go to the platform state directory, never to the terminal,
//! since the alternate screen owns stdout while the app runs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "studyhub";
const RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("could not determine platform directories")]
    NoPlatformDirs,
    #[error("failed to create log directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

/// Handle returned by [`init`]. The guard must live as long as the app so
/// buffered log lines get flushed on exit.
pub struct LoggingContext {
    pub _guard: WorkerGuard,
    pub session_id: String,
    pub log_directory: PathBuf,
}

/// 6-character hex id distinguishing interleaved sessions in one day's file.
fn generate_session_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    let bytes: [u8; 3] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Initialize the global subscriber with a daily-rotating file writer.
///
/// `level` comes from the config file; the `STUDYHUB_LOG` / `RUST_LOG`
/// environment filter wins when set.
pub fn init(level: &str) -> Result<LoggingContext, LoggingError> {
    let session_id = generate_session_id();
    let log_dir = log_directory().ok_or(LoggingError::NoPlatformDirs)?;
    fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_env(crate::config::ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_span_events(FmtSpan::NONE)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    info!(session_id = %session_id, "session start");

    Ok(LoggingContext {
        _guard: guard,
        session_id,
        log_directory: log_dir,
    })
}

/// macOS: ~/Library/Logs/studyhub/. Linux: ~/.local/state/studyhub/.
fn log_directory() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library").join("Logs").join("studyhub"))
    } else {
        ProjectDirs::from("dev", "studyhub", "studyhub")
            .and_then(|dirs| dirs.state_dir().map(PathBuf::from))
    }
}

/// Delete rotated `studyhub.*` files older than the retention window.
/// Failures are logged and otherwise ignored; cleanup never blocks startup.
pub fn cleanup_old_logs(log_dir: &Path) {
    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "failed to read log directory for cleanup");
            return;
        }
    };

    let now = SystemTime::now();
    let mut deleted = 0u32;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        let is_rotated_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| {
                name.starts_with(&format!("{LOG_FILE_PREFIX}.")) && name != LOG_FILE_PREFIX
            });
        if !is_rotated_log {
            continue;
        }

        let Some(age) = file_age(&path, now) else {
            continue;
        };
        if age <= RETENTION {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(file = %path.display(), age_days = age.as_secs() / 86400, "deleted old log file");
                deleted += 1;
            }
            Err(e) => warn!(file = %path.display(), error = %e, "failed to delete old log file"),
        }
    }

    if deleted > 0 {
        debug!(count = deleted, "log cleanup finished");
    }
}

fn file_age(path: &Path, now: SystemTime) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    // Files with future timestamps are skipped.
    now.duration_since(modified).ok()
}
