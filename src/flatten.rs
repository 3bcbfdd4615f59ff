//! Projection of normalized records into one row per publication.

use crate::model::{FlatRow, PersonRecord, Publication};

/// Flatten records into table rows.
///
/// A person with no works still gets exactly one row, with empty publication
/// fields. Row order follows record order, then publication order.
pub fn flatten(records: &[PersonRecord]) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for record in records {
        if record.works.is_empty() {
            rows.push(row(record, None));
        } else {
            rows.extend(record.works.iter().map(|work| row(record, Some(work))));
        }
    }

    rows
}

fn row(record: &PersonRecord, work: Option<&Publication>) -> FlatRow {
    let blank = Publication::default();
    let work = work.unwrap_or(&blank);

    FlatRow {
        orcid: record.orcid.clone(),
        found: record.found,
        given: record.name.given_names.clone(),
        family: record.name.family_name.clone(),
        doi: work.doi.clone(),
        eid: work.eid.clone(),
        work_type: work.work_type.clone(),
        year: work.date.clone(),
        journal: work.journal.clone(),
        title: work.title.clone(),
        link: work.link.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IdentityInfo;

    fn person(orcid: &str, works: Vec<Publication>) -> PersonRecord {
        PersonRecord {
            orcid: orcid.to_string(),
            found: true,
            name: IdentityInfo {
                orcid_id: orcid.to_string(),
                given_names: "Ada".to_string(),
                family_name: "Lovelace".to_string(),
            },
            works,
            employers: vec![],
            qualifications: vec![],
        }
    }

    fn work(title: &str, year: &str) -> Publication {
        Publication::new(
            "journal-article".to_string(),
            year.to_string(),
            "Journal".to_string(),
            title.to_string(),
            String::new(),
            "10.1/x",
            "2-s2.0-1".to_string(),
        )
    }

    #[test]
    fn test_person_without_works_yields_one_row() {
        let rows = flatten(&[person("0001", vec![])]);
        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.orcid, "0001");
        assert!(r.found);
        assert_eq!(r.given, "Ada");
        assert_eq!(r.family, "Lovelace");
        for value in [&r.doi, &r.eid, &r.work_type, &r.year, &r.journal, &r.title, &r.link] {
            assert!(value.is_empty());
        }
    }

    #[test]
    fn test_one_row_per_work_in_order() {
        let records = vec![
            person("0001", vec![work("A", "2019"), work("B", "2021")]),
            person("0002", vec![]),
            person("0003", vec![work("C", "2020")]),
        ];
        let rows = flatten(&records);
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.orcid.as_str(), r.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("0001", "A"), ("0001", "B"), ("0002", ""), ("0003", "C")]
        );
    }

    #[test]
    fn test_publication_fields_copied_verbatim() {
        let rows = flatten(&[person("0001", vec![work("A", "2019")])]);
        let r = &rows[0];
        assert_eq!(r.doi, "https://www.doi.org/10.1/x");
        assert_eq!(r.eid, "2-s2.0-1");
        assert_eq!(r.work_type, "journal-article");
        assert_eq!(r.year, "2019");
        assert_eq!(r.journal, "Journal");
        assert_eq!(r.link, r.doi);
    }

    #[test]
    fn test_not_found_record_still_flattens() {
        let rows = flatten(&[PersonRecord::not_found("0009")]);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].found);
        assert_eq!(rows[0].orcid, "0009");
    }

    #[test]
    fn test_empty_input() {
        assert!(flatten(&[]).is_empty());
    }
}
