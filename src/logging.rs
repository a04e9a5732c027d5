//! Tracing subscriber setup
//!
//! The interactive browser owns the terminal, so it logs to a daily rolling
//! file. Every other command logs to stderr.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "IMGNAV_LOG";

/// Base name of the rolling log file.
pub const LOG_FILE: &str = "imgnav.log";

/// Directory holding the rolling log files.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("imgnav").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("imgnav").join("logs"))
}

/// Filter from `IMGNAV_LOG`, falling back to `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to a daily rolling file in `dir`.
///
/// Keep the returned guard alive for the whole run; dropping it flushes
/// and stops the background writer.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    prune_old_logs(dir);

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(env_filter("imgnav=info"))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))?;

    tracing::info!("imgnav v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(guard)
}

/// Log warnings and errors to stderr.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter("imgnav=warn"))
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {}", e))
}

/// Remove rolled files from previous days.
fn prune_old_logs(dir: &Path) {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prefix = format!("{}.", LOG_FILE);
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && !name.ends_with(&today) {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}
