//! Loading identifier lists.

use crate::error::Result;
use std::path::Path;
use tracing::info;

/// One identifier per line, trimmed, blank lines dropped. Order and
/// duplicates are kept.
pub fn parse_identifiers(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read and parse an identifier file.
pub fn load_identifiers(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)?;
    let ids = parse_identifiers(&text);
    info!(count = ids.len(), path = %path.display(), "Loaded identifiers");
    Ok(ids)
}
