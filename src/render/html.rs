//! HTML pages: a per-person detail view and a sortable publication table.

use super::{CSV_FILE, HTML_FILE, JSONL_FILE, JSON_FILE, SORTABLE_HTML_FILE};
use crate::model::{FlatRow, PersonRecord, Publication};
use crate::orcid::ORCID_BASE_URL;
use std::cmp::Ordering;

const PAGE_TITLE: &str = "Staff Publications";

const SORTABLE_JS: &str = "https://cdn.jsdelivr.net/gh/tofsjonas/sortable/sortable.min.js";
const SORTABLE_CSS: &str = "https://cdn.jsdelivr.net/gh/tofsjonas/sortable/sortable.min.css";

/// Columns of the sortable table, independent of row data
pub const SORTABLE_COLUMNS: &[&str] = &["name", "year", "title", "type"];

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn profile_link(orcid: &str) -> String {
    format!("{}/{}", ORCID_BASE_URL, orcid)
}

/// Anchor when `href` is non-empty, plain text otherwise.
fn link_or_text(href: &str, text: &str) -> String {
    if href.is_empty() {
        escape(text)
    } else {
        format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
    }
}

fn format_nav() -> String {
    let links = [
        (CSV_FILE, "CSV"),
        (HTML_FILE, "HTML"),
        (SORTABLE_HTML_FILE, "HTML2"),
        (JSON_FILE, "JSON"),
        (JSONL_FILE, "JSON-L"),
    ]
    .iter()
    .map(|(file, label)| format!("<a href=\"./{}\">{}</a>", file, label))
    .collect::<Vec<_>>()
    .join(" |\n      ");

    format!("    <div>\n      Formats:\n      {}\n    </div>\n    <hr />\n", links)
}

fn page(head_extra: &str, body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n<html>\n  <head>\n",
            "    <meta charset=\"utf-8\">\n",
            "    <title>{title}</title>\n",
            "{head_extra}  </head>\n  <body>\n",
            "    <h1>{title}</h1>\n",
            "{nav}{body}  </body>\n</html>\n",
        ),
        title = PAGE_TITLE,
        head_extra = head_extra,
        nav = format_nav(),
        body = body,
    )
}

/// Newest first; a missing or non-numeric year sorts last.
fn by_year_desc(a: &Publication, b: &Publication) -> Ordering {
    let key = |p: &Publication| p.year().unwrap_or(i64::MIN);
    key(b).cmp(&key(a))
}

fn format_work(work: &Publication) -> String {
    let kind = if work.work_type.is_empty() {
        "work"
    } else {
        work.work_type.as_str()
    };
    format!(
        "          <li>{} - {} [{}]</li>\n",
        escape(&work.date),
        link_or_text(&work.link, &work.title),
        escape(kind)
    )
}

fn format_person(person: &PersonRecord) -> String {
    let mut works: Vec<&Publication> = person.works.iter().collect();
    works.sort_by(|a, b| by_year_desc(a, b));

    let items: String = works.into_iter().map(format_work).collect();

    format!(
        concat!(
            "    <details>\n",
            "      <summary>{}, {} (<a href=\"{}\">ORCID</a>)</summary>\n",
            "      <div>\n",
            "        <div>{} works listed in ORCID</div>\n",
            "        <ul>\n{}        </ul>\n",
            "      </div>\n",
            "    </details>\n",
        ),
        escape(&person.name.family_name),
        escape(&person.name.given_names),
        escape(&profile_link(&person.orcid)),
        person.works.len(),
        items
    )
}

/// Detail page: one collapsible block per person, sorted by family name then
/// given names, works newest first.
pub fn render_html(records: &[PersonRecord]) -> String {
    let mut people: Vec<&PersonRecord> = records.iter().collect();
    people.sort_by(|a, b| {
        (&a.name.family_name, &a.name.given_names).cmp(&(&b.name.family_name, &b.name.given_names))
    });

    let body: String = people.into_iter().map(format_person).collect();
    page("", &body)
}

/// Sortable table page, one row per flattened row, in flattened order.
pub fn render_html_sortable(rows: &[FlatRow]) -> String {
    let head_extra = format!(
        "    <script src=\"{}\"></script>\n    <link href=\"{}\" rel=\"stylesheet\" />\n",
        SORTABLE_JS, SORTABLE_CSS
    );

    let header: String = SORTABLE_COLUMNS
        .iter()
        .map(|c| format!("\n            <th>{}</th>", c))
        .collect();

    let body_rows: String = rows
        .iter()
        .map(|row| {
            let cells = [
                link_or_text(
                    &profile_link(&row.orcid),
                    &format!("{}, {}", row.family, row.given),
                ),
                escape(&row.year),
                link_or_text(&row.link, &row.title),
                escape(&row.work_type),
            ];
            let cells: String = cells
                .iter()
                .map(|c| format!("\n            <td>{}</td>", c))
                .collect();
            format!("\n          <tr>{}\n          </tr>", cells)
        })
        .collect();

    let table = format!(
        concat!(
            "    <table class=\"sortable\">\n",
            "      <thead>\n          <tr>{}\n          </tr>\n      </thead>\n",
            "      <tbody>{}\n      </tbody>\n",
            "    </table>\n",
        ),
        header, body_rows
    );

    page(&head_extra, &table)
}
