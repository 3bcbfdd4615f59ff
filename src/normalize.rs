//! Composition of the field extractors into one [`PersonRecord`].

use crate::error::{OrcidError, Result};
use crate::extract::{
    extract_employers, extract_identity, extract_publications, extract_qualifications,
};
use crate::json_path::kind_of;
use crate::model::PersonRecord;
use serde_json::Value;

/// Normalize one raw registry document for the requested identifier.
///
/// Any missing field degrades to its empty value. Only a document that is
/// not a JSON object is rejected.
///
/// # Errors
///
/// Returns [`OrcidError::InvalidResponseShape`] when `raw` is not an object.
pub fn normalize(orcid: &str, raw: &Value) -> Result<PersonRecord> {
    if !raw.is_object() {
        return Err(OrcidError::InvalidResponseShape {
            orcid: orcid.to_string(),
            kind: kind_of(raw),
        });
    }

    let name = extract_identity(raw);

    Ok(PersonRecord {
        orcid: orcid.to_string(),
        found: !name.orcid_id.is_empty(),
        name,
        works: extract_publications(raw),
        employers: extract_employers(raw),
        qualifications: extract_qualifications(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentityInfo;
    use serde_json::json;

    #[test]
    fn test_identity_only_record() {
        let raw = json!({
            "orcid-identifier": {"path": "0000-0001-2345-6789"},
            "person": {"name": {
                "given-names": {"value": "Ada"},
                "family-name": {"value": "Lovelace"}
            }}
        });
        let rec = normalize("0000-0001-2345-6789", &raw).unwrap();
        assert_eq!(
            rec,
            PersonRecord {
                orcid: "0000-0001-2345-6789".to_string(),
                found: true,
                name: IdentityInfo {
                    orcid_id: "0000-0001-2345-6789".to_string(),
                    given_names: "Ada".to_string(),
                    family_name: "Lovelace".to_string(),
                },
                works: vec![],
                employers: vec![],
                qualifications: vec![],
            }
        );
    }

    #[test]
    fn test_missing_identity_is_not_found() {
        let raw = json!({"response-code": 404, "developer-message": "not found"});
        let rec = normalize("0000-0000-0000-0000", &raw).unwrap();
        assert!(!rec.found);
        assert_eq!(rec.orcid, "0000-0000-0000-0000");
        assert_eq!(rec.name, IdentityInfo::default());
    }

    #[test]
    fn test_found_when_canonical_id_differs() {
        let raw = json!({"orcid-identifier": {"path": "0000-0001-2345-678X"}});
        let rec = normalize("0000-0001-2345-678x", &raw).unwrap();
        assert!(rec.found);
        assert_eq!(rec.orcid, "0000-0001-2345-678x");
        assert_eq!(rec.name.orcid_id, "0000-0001-2345-678X");
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = normalize("0000-0001", &json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(
            err,
            OrcidError::InvalidResponseShape { ref orcid, kind: "array" } if orcid == "0000-0001"
        ));
    }

    #[test]
    fn test_partial_activities() {
        let raw = json!({
            "orcid-identifier": {"path": "0000-0003"},
            "activities-summary": {"works": null, "employments": {"affiliation-group": "garbage"}}
        });
        let rec = normalize("0000-0003", &raw).unwrap();
        assert!(rec.found);
        assert!(rec.works.is_empty());
        assert!(rec.employers.is_empty());
    }
}
