//! Output renderers.
//!
//! Every renderer is a pure function from normalized data to a text
//! document. An empty input renders a valid, empty document.

pub mod csv;
pub mod html;
pub mod json;

pub use csv::render_csv;
pub use html::{render_html, render_html_sortable};
pub use json::{render_json, render_jsonl};

/// Tabular output
pub const CSV_FILE: &str = "works.csv";
/// Per-person detail page
pub const HTML_FILE: &str = "works.html";
/// Sortable table page
pub const SORTABLE_HTML_FILE: &str = "works2.html";
/// Pretty JSON array of records
pub const JSON_FILE: &str = "works.json";
/// One JSON record per line
pub const JSONL_FILE: &str = "works.jsonl";
