//! Diagnostic logging to disk.
//!
//! When enabled, `tracing` events are written to a daily log file named
//! `unbias_<date>.log` in the configured log directory (default:
//! `~/.local/share/unbias/logs/`). Nothing is ever written to the terminal,
//! which belongs to the UI. `RUST_LOG` overrides the configured level.

use crate::config::{expand_home, LoggingConfig};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Path of the log file for `date` inside `log_dir`.
pub fn log_file_path(log_dir: &Path, date: NaiveDate) -> PathBuf {
    log_dir.join(format!("unbias_{}.log", date.format("%Y-%m-%d")))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_file_path(&log_dir, Local::now().date_naive());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(Some(path))
}
