//! Normalized researcher records.
//!
//! Field declaration order is significant: it is the serialized key order of
//! the JSON outputs and the basis of canonical ordering in [`crate::dedup`].

use serde::{Deserialize, Serialize};

/// Resolver prefix for DOI links
pub const DOI_RESOLVER: &str = "https://www.doi.org/";

/// Identity section of a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    /// Canonical identifier reported by the registry (empty if not found)
    pub orcid_id: String,
    pub given_names: String,
    pub family_name: String,
}

/// Organization an employment or qualification refers to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    /// Organization name
    pub name: String,
    /// Disambiguation authority (e.g. ROR, GRID, RINGGOLD)
    pub code_src: String,
    /// Identifier within the disambiguation authority
    pub code_val: String,
}

/// A scholarly work, taken from the preferred variant of a work group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(rename = "type")]
    pub work_type: String,
    /// Publication year
    pub date: String,
    pub journal: String,
    pub title: String,
    pub url: String,
    /// DOI as a resolver URL
    pub doi: String,
    /// Scopus EID
    pub eid: String,
    /// `doi` if present, else `url`, else empty
    pub link: String,
}

impl Publication {
    /// Build a publication from source values.
    ///
    /// `doi` is the bare DOI as found in the registry; it is rewritten to a
    /// resolver URL. `link` is derived here and nowhere else.
    pub fn new(
        work_type: String,
        date: String,
        journal: String,
        title: String,
        url: String,
        doi: &str,
        eid: String,
    ) -> Self {
        let doi = if doi.is_empty() {
            String::new()
        } else {
            format!("{}{}", DOI_RESOLVER, doi)
        };
        let link = if !doi.is_empty() {
            doi.clone()
        } else {
            url.clone()
        };

        Self {
            work_type,
            date,
            journal,
            title,
            url,
            doi,
            eid,
            link,
        }
    }

    /// Publication year as a number, if it is one.
    pub fn year(&self) -> Option<i64> {
        self.date.trim().parse().ok()
    }
}

/// One normalized researcher, keyed by the identifier that was requested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Identifier as requested (not necessarily equal to `name.orcid_id`)
    pub orcid: String,
    /// Whether the registry reported a canonical identifier
    pub found: bool,
    pub name: IdentityInfo,
    pub works: Vec<Publication>,
    pub employers: Vec<Affiliation>,
    pub qualifications: Vec<Affiliation>,
}

impl PersonRecord {
    /// Placeholder for an identifier that could not be resolved.
    pub fn not_found(orcid: &str) -> Self {
        Self {
            orcid: orcid.to_string(),
            ..Default::default()
        }
    }
}

/// Column names of [`FlatRow`], in serialized order
pub const FLAT_ROW_COLUMNS: &[&str] = &[
    "orcid", "found", "given", "family", "doi", "eid", "type", "year", "journal", "title", "link",
];

/// One (person, publication) pair for tabular outputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub orcid: String,
    pub found: bool,
    pub given: String,
    pub family: String,
    pub doi: String,
    pub eid: String,
    #[serde(rename = "type")]
    pub work_type: String,
    pub year: String,
    pub journal: String,
    pub title: String,
    pub link: String,
}
