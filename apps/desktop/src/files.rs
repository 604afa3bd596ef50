//! Byte-preserving collaborators: loading source code, exporting translated
//! output, and handing it to the system clipboard.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use shared::domain::LanguageId;
use tracing::info;

pub async fn read_source_file(path: &Path) -> anyhow::Result<String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read source file '{}'", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "loaded source file");
    Ok(text)
}

/// `translation_<unix millis>.<target>`, mirroring the download name the web
/// front end generated.
pub fn export_file_name(target: &LanguageId, millis: i64) -> String {
    format!("translation_{millis}.{}", target.as_str())
}

pub async fn export_translation(
    dir: &Path,
    target: &LanguageId,
    text: &str,
) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;
    let path = dir.join(export_file_name(target, Utc::now().timestamp_millis()));
    tokio::fs::write(&path, text.as_bytes())
        .await
        .with_context(|| format!("failed to write translation to '{}'", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "exported translation");
    Ok(path)
}

pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write clipboard")?;
    info!(bytes = text.len(), "copied translation to clipboard");
    Ok(())
}

#[cfg(test)]
#[path = "tests/files_tests.rs"]
mod tests;
