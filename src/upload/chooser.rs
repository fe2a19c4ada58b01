//! Turns a path typed by the borrower into a [`ChosenFile`].
//!
//! Only metadata is read; the file itself is never opened.

use super::validate::ChosenFile;
use crate::config::expand_home;
use anyhow::{bail, Context, Result};

pub async fn inspect(path: &str) -> Result<ChosenFile> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        bail!("No file path given");
    }
    let path = expand_home(trimmed);
    let meta = tokio::fs::metadata(&path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    if !meta.is_file() {
        bail!("{} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    Ok(ChosenFile::new(&name, meta.len()))
}
