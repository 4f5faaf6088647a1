//! Tracing setup for the arena binary.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Setup logging to stderr and, when requested, to a per-session file.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the program.
pub fn setup_logging(session_id: Option<&str>, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard, session_log_dir) = if log_to_file {
        let session_id = session_id.map_or_else(default_session_id, str::to_owned);
        let session_log_dir = log_directory().join(session_id);
        std::fs::create_dir_all(&session_log_dir)?;

        let file_appender = tracing_appender::rolling::never(&session_log_dir, "arena.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false)
            .boxed();

        (Some(layer), Some(guard), Some(session_log_dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = session_log_dir {
        tracing::info!("Log file: {}", dir.join("arena.log").display());
    }

    Ok(guard)
}

/// Platform cache directory for arena logs.
///
/// - macOS: `~/Library/Caches/arena/logs`
/// - Linux: `~/.cache/arena/logs` (or `$XDG_CACHE_HOME/arena/logs`)
/// - Windows: `%LOCALAPPDATA%\arena\cache\logs`
/// - Fallback: `/tmp/arena/logs`
pub fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/arena"))
        .join("logs")
}

fn default_session_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("session_{timestamp}")
}
