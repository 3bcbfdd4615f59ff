//! JSON and JSON Lines rendering of records.

use crate::error::Result;
use crate::model::PersonRecord;

/// Pretty-printed JSON array of all records.
pub fn render_json(records: &[PersonRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// One compact JSON object per record per line.
pub fn render_jsonl(records: &[PersonRecord]) -> Result<String> {
    let lines = records
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
