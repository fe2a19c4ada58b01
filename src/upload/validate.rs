//! File checks applied before a document upload starts.
//!
//! - **Size**: files above the configured limit (5 MB by default) are refused.
//! - **Type**: only the configured extensions are accepted, compared
//!   case-insensitively.
//! - **Display name**: names are reduced to their final path component with
//!   control characters removed before they are shown or logged.

use crate::config::UploadConfig;
use std::path::Path;
use thiserror::Error;

/// A file the borrower picked for a document slot. Only metadata is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChosenFile {
    pub name: String,
    pub size_bytes: u64,
    /// Includes the leading dot, e.g. `.pdf`. Empty when the name has none.
    pub extension: String,
}

impl ChosenFile {
    pub fn new(name: &str, size_bytes: u64) -> Self {
        let name = display_name(name);
        let extension = name
            .rfind('.')
            .map(|i| name[i..].to_string())
            .unwrap_or_default();
        Self {
            name,
            size_bytes,
            extension,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{name} exceeds the {limit} size limit")]
    TooLarge { name: String, limit: String },
    #[error("{name} is not a supported file type")]
    UnsupportedType { name: String },
}

/// Check a chosen file against the upload limits.
pub fn check(file: &ChosenFile, config: &UploadConfig) -> Result<(), ValidationError> {
    if file.size_bytes > config.max_file_size {
        return Err(ValidationError::TooLarge {
            name: file.name.clone(),
            limit: human_size(config.max_file_size),
        });
    }

    let extension = normalize_extension(&file.extension);
    let allowed = config
        .allowed_extensions
        .iter()
        .any(|ext| normalize_extension(ext) == extension);
    if extension.len() < 2 || !allowed {
        return Err(ValidationError::UnsupportedType {
            name: file.name.clone(),
        });
    }
    Ok(())
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

/// Render a byte limit the way borrowers read it: `5MB`, `512KB`.
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB {
        format!("{}KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Reduce a picked file name to something safe to display.
pub fn display_name(filename: &str) -> String {
    // Handle backslash manually since on Unix it's a valid char
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let name = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name);

    let cleaned: String = name.chars().filter(|c| !c.is_control()).collect();

    if cleaned.chars().count() > 255 {
        cleaned.chars().take(255).collect()
    } else {
        cleaned
    }
}
