//! CSV rendering of flattened rows.
//!
//! Each line is a JSON array with its brackets removed, which quotes and
//! escapes embedded commas, quotes and newlines.

use crate::model::{FlatRow, FLAT_ROW_COLUMNS};
use serde_json::{json, Value};

/// Render rows as CSV with a header line.
pub fn render_csv(rows: &[FlatRow]) -> String {
    let header = Value::from(FLAT_ROW_COLUMNS.to_vec());

    std::iter::once(header)
        .chain(rows.iter().map(row_values))
        .map(|line| strip_brackets(&line.to_string()).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Row values in `FLAT_ROW_COLUMNS` order
fn row_values(row: &FlatRow) -> Value {
    json!([
        row.orcid,
        row.found,
        row.given,
        row.family,
        row.doi,
        row.eid,
        row.work_type,
        row.year,
        row.journal,
        row.title,
        row.link,
    ])
}

fn strip_brackets(encoded: &str) -> &str {
    encoded
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(encoded)
}
