//! Field extractors over a raw ORCID record.
//!
//! Each extractor is a pure function of the registry document. Missing nodes
//! yield empty strings or empty collections, never errors.

use crate::dedup::canonical_dedup;
use crate::json_path::{items_at, node_at, text_at};
use crate::model::{Affiliation, IdentityInfo, Publication};
use serde_json::Value;

/// Affiliation roles and where they live in the activities summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffiliationRole {
    Employment,
    Qualification,
}

impl AffiliationRole {
    fn section(self) -> &'static str {
        match self {
            Self::Employment => "employments",
            Self::Qualification => "qualifications",
        }
    }

    fn summary_key(self) -> &'static str {
        match self {
            Self::Employment => "employment-summary",
            Self::Qualification => "qualification-summary",
        }
    }
}

/// Extract the canonical identifier and name.
pub fn extract_identity(record: &Value) -> IdentityInfo {
    IdentityInfo {
        orcid_id: text_at(record, &["orcid-identifier", "path"]),
        given_names: text_at(record, &["person", "name", "given-names", "value"]),
        family_name: text_at(record, &["person", "name", "family-name", "value"]),
    }
}

/// Extract organizations for one affiliation role, deduplicated.
pub fn extract_affiliations(record: &Value, role: AffiliationRole) -> Vec<Affiliation> {
    let groups = items_at(record, &["activities-summary", role.section(), "affiliation-group"]);

    let items = groups
        .iter()
        .flat_map(|group| items_at(group, &["summaries"]))
        .map(|summary| match node_at(summary, &[role.summary_key(), "organization"]) {
            Some(org) => Affiliation {
                name: text_at(org, &["name"]),
                code_src: text_at(org, &["disambiguated-organization", "disambiguation-source"]),
                code_val: text_at(
                    org,
                    &["disambiguated-organization", "disambiguated-organization-identifier"],
                ),
            },
            None => Affiliation::default(),
        })
        .collect();

    canonical_dedup(items)
}

/// Institutions where the person was employed.
pub fn extract_employers(record: &Value) -> Vec<Affiliation> {
    extract_affiliations(record, AffiliationRole::Employment)
}

/// Institutions where the person obtained a qualification.
pub fn extract_qualifications(record: &Value) -> Vec<Affiliation> {
    extract_affiliations(record, AffiliationRole::Qualification)
}

/// Extract publications, one per work group, deduplicated.
///
/// A work group holds every submission of the same work; the registry lists
/// the preferred one first, so only `work-summary[0]` is read.
pub fn extract_publications(record: &Value) -> Vec<Publication> {
    let groups = items_at(record, &["activities-summary", "works", "group"]);

    let items = groups
        .iter()
        .filter_map(|group| items_at(group, &["work-summary"]).first())
        .filter(|summary| !summary.is_null())
        .map(publication_from_summary)
        .collect();

    canonical_dedup(items)
}

fn publication_from_summary(summary: &Value) -> Publication {
    let mut doi = String::new();
    let mut eid = String::new();

    // Last value of each tag wins.
    for ext in items_at(summary, &["external-ids", "external-id"]) {
        match text_at(ext, &["external-id-type"]).as_str() {
            "doi" => doi = text_at(ext, &["external-id-value"]),
            "eid" => eid = text_at(ext, &["external-id-value"]),
            _ => {}
        }
    }

    Publication::new(
        text_at(summary, &["type"]),
        text_at(summary, &["publication-date", "year", "value"]),
        text_at(summary, &["journal-title", "value"]),
        text_at(summary, &["title", "title", "value"]),
        text_at(summary, &["url", "value"]),
        &doi,
        eid,
    )
}
