pub mod model;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::fmt::Write;
use std::path::PathBuf;

pub use model::{AppConfig, LoggingConfig, SubmissionConfig, TrackingConfig, UploadConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unbias")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("Invalid config in {}", path.display()))
}

fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(contents).with_context(|| "Failed to parse config file")?;
    check_date_format(&config.ui.date_format)?;
    Ok(config)
}

/// Reject a `ui.date_format` chrono cannot render, so rendering never fails later.
fn check_date_format(format: &str) -> Result<()> {
    let mut out = String::new();
    write!(out, "{}", NaiveDate::default().format(format))
        .map_err(|_| anyhow!("ui.date_format {:?} is not a valid date format", format))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}
