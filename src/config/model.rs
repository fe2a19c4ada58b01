//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Document upload limits and the pace of the simulated transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
}

impl UploadConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Percentage added per tick, never zero so uploads always finish.
    pub fn step(&self) -> u8 {
        self.progress_step.clamp(1, 100)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
            tick_interval_ms: default_tick_interval_ms(),
            progress_step: default_progress_step(),
        }
    }
}

/// Simulated application submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_submission_delay_ms")]
    pub delay_ms: u64,
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_submission_delay_ms(),
        }
    }
}

/// Application status auto-advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_advance_interval_secs")]
    pub advance_interval_secs: u64,
    #[serde(default = "default_auto_advance_ceiling")]
    pub auto_advance_ceiling: usize,
}

impl TrackingConfig {
    pub fn advance_interval(&self) -> Duration {
        Duration::from_secs(self.advance_interval_secs)
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            advance_interval_secs: default_advance_interval_secs(),
            auto_advance_ceiling: default_auto_advance_ceiling(),
        }
    }
}

/// UI appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 // 5 MB
}
fn default_allowed_extensions() -> Vec<String> {
    [".pdf", ".jpg", ".jpeg", ".png", ".doc", ".docx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_tick_interval_ms() -> u64 {
    300
}
fn default_progress_step() -> u8 {
    10
}
fn default_submission_delay_ms() -> u64 {
    2000
}
fn default_advance_interval_secs() -> u64 {
    5
}
fn default_auto_advance_ceiling() -> usize {
    2
}
fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/unbias/logs".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
