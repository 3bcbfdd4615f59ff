//! The five output documents and writing them to disk.

use crate::error::Result;
use crate::flatten::flatten;
use crate::model::PersonRecord;
use crate::render::{
    render_csv, render_html, render_html_sortable, render_json, render_jsonl, CSV_FILE, HTML_FILE,
    JSONL_FILE, JSON_FILE, SORTABLE_HTML_FILE,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// A rendered output document
#[derive(Debug, Clone)]
pub struct Artifact {
    /// File name within the output directory
    pub file_name: &'static str,
    pub content: String,
}

/// Render every output document for `records`.
pub fn render_all(records: &[PersonRecord]) -> Result<Vec<Artifact>> {
    let rows = flatten(records);

    Ok(vec![
        Artifact {
            file_name: CSV_FILE,
            content: render_csv(&rows),
        },
        Artifact {
            file_name: HTML_FILE,
            content: render_html(records),
        },
        Artifact {
            file_name: JSON_FILE,
            content: render_json(records)?,
        },
        Artifact {
            file_name: JSONL_FILE,
            content: render_jsonl(records)?,
        },
        Artifact {
            file_name: SORTABLE_HTML_FILE,
            content: render_html_sortable(&rows),
        },
    ])
}

/// Render and write every output document into `dir`.
///
/// Returns the written paths in write order. Each file is fully written
/// before the next one is started.
pub fn save(records: &[PersonRecord], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for artifact in render_all(records)? {
        let path = dir.join(artifact.file_name);
        std::fs::write(&path, &artifact.content)?;
        info!(path = %path.display(), bytes = artifact.content.len(), "Saved artifact");
        written.push(path);
    }

    Ok(written)
}
