//! Null-safe navigation into registry JSON.
//!
//! Registry documents are deeply optional: any intermediate node may be
//! missing, `null`, or of an unexpected type. Every extractor walks the tree
//! through these helpers so that a missing node degrades to an empty value.

use serde_json::Value;

/// Follow `path` (object keys) from `value`.
///
/// Returns `None` as soon as a key is missing or a node is not an object.
pub fn node_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// Text at `path`, or `""` when absent.
///
/// Numbers and booleans are rendered as text; `null`, arrays and objects
/// read as empty.
pub fn text_at(value: &Value, path: &[&str]) -> String {
    match node_at(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Array elements at `path`, or an empty slice when absent or not an array.
pub fn items_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    node_at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// JSON kind name used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
