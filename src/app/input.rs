//! Reading target lists.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads a newline-delimited list of targets.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
/// Entries are returned as written, without normalization.
pub async fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open URL list {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();
    let mut targets = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .with_context(|| format!("Failed to read URL list {}", path.display()))?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        targets.push(trimmed.to_string());
    }
    Ok(targets)
}
