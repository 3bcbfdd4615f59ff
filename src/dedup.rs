//! Canonical deduplication of normalized records.
//!
//! Each record is encoded as compact JSON. serde's derived `Serialize` emits
//! struct fields in declaration order, so the encoding is deterministic and
//! deep. Records are ordered by that encoding and two records are duplicates
//! iff their encodings are equal.

use serde::Serialize;

/// Canonical encoding of a record.
fn canonical_key<T: Serialize>(item: &T) -> String {
    // Plain string/bool records cannot fail to serialize.
    serde_json::to_string(item).unwrap_or_default()
}

/// Remove structural duplicates and sort by canonical encoding.
///
/// The result does not depend on input order, and applying it twice is the
/// same as applying it once.
pub fn canonical_dedup<T: Serialize>(items: Vec<T>) -> Vec<T> {
    let mut keyed: Vec<(String, T)> = items
        .into_iter()
        .map(|item| (canonical_key(&item), item))
        .collect();

    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);

    keyed.into_iter().map(|(_, item)| item).collect()
}
