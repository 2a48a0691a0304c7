// src/specs/detail.rs
//! Scraping *spec* for a single recruitment page.
//!
//! Tables:
//! - each `<table>` is labelled by the nearest heading found by walking up
//!   from its parent: the first ancestor that contains any `h2, h3, h4`
//!   supplies the first such heading (document order within that ancestor).
//! - rows are the trimmed `td`/`th` texts of each `tr`; empty rows vanish.
//! - a table with no heading or no rows is dropped.
//! - a repeated heading replaces the earlier rows (first position kept) and
//!   is logged, since data is lost.
//!
//! The heading walk is a heuristic: on irregular markup a table can pick up a
//! heading from an unrelated earlier section.
//!
//! Links: every `a[href]` with an href and text longer than 3 chars is kept
//! and counted; important ones (action keywords) are surfaced in order.

use tracing::{debug, warn};

use crate::core::html::{Document, Node};
use crate::data::{ClassifiedLink, DetailTable, PageMeta, RecruitmentDetail, Tables};

pub const IMPORTANT_KEYWORDS: [&str; 5] = ["apply", "official", "notification", "admit", "result"];
const HEADING_SELECTOR: &str = "h2, h3, h4";
// Link labels this short ("PDF", "OK") are not worth keeping.
const MIN_LINK_TEXT: usize = 3;

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str, meta: PageMeta) -> RecruitmentDetail {
    let doc = Document::parse(html_doc);
    extract_detail(&doc, meta)
}

pub fn extract_detail(doc: &Document, meta: PageMeta) -> RecruitmentDetail {
    let title = doc
        .select_first("h1")
        .map(|h| h.text())
        .filter(|t| !t.is_empty());

    let mut tables = Tables::new();
    for table in doc.select("table") {
        let Some(found) = read_table(&table) else { continue };
        if let Some(previous) = tables.insert(found.heading.clone(), found.rows) {
            warn!(
                url = %meta.source_url,
                heading = %found.heading,
                dropped_rows = previous.len(),
                "duplicate table heading; earlier table overwritten"
            );
        }
    }

    let links: Vec<ClassifiedLink> = doc
        .select("a[href]")
        .into_iter()
        .filter_map(|a| classify_anchor(&a))
        .collect();
    let links_count = links.len();
    let important_links: Vec<ClassifiedLink> = links.into_iter().filter(|l| l.is_important).collect();

    debug!(
        url = %meta.source_url,
        tables = tables.len(),
        links = links_count,
        important = important_links.len(),
        "detail extracted"
    );

    RecruitmentDetail {
        source_url: meta.source_url,
        fetched_at: meta.fetched_at,
        http_status: meta.http_status,
        title,
        tables,
        links_count,
        important_links,
    }
}

/// Heading + rows for one table, or `None` if either is missing.
pub fn read_table(table: &Node<'_>) -> Option<DetailTable> {
    let rows = read_rows(table);
    if rows.is_empty() {
        return None;
    }
    let heading = nearest_heading(table)?;
    Some(DetailTable { heading, rows })
}

fn read_rows(table: &Node<'_>) -> Vec<Vec<String>> {
    table
        .select("tr")
        .into_iter()
        .map(|tr| tr.select("td, th").into_iter().map(|c| c.text()).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect()
}

fn nearest_heading(table: &Node<'_>) -> Option<String> {
    let mut cur = table.parent();
    while let Some(ancestor) = cur {
        if let Some(h) = ancestor.select_first(HEADING_SELECTOR) {
            return Some(h.text());
        }
        cur = ancestor.parent();
    }
    None
}

fn classify_anchor(a: &Node<'_>) -> Option<ClassifiedLink> {
    let text = a.text();
    let url = a.attr("href").unwrap_or("").trim().to_string();
    if text.chars().count() <= MIN_LINK_TEXT || url.is_empty() {
        return None;
    }
    let is_important = is_important(&text);
    Some(ClassifiedLink { text, url, is_important })
}

/// Keyword hit on the lowercased text, and more than 3 characters long.
pub fn is_important(text: &str) -> bool {
    if text.chars().count() <= MIN_LINK_TEXT {
        return false;
    }
    let lc = text.to_lowercase();
    IMPORTANT_KEYWORDS.iter().any(|k| lc.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meta() -> PageMeta {
        PageMeta::new("https://example.test/up-police/", Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn table_keyed_by_sibling_heading() {
        let d = parse_doc(
            "<h2>Important Dates</h2><table><tr><td>Start</td><td>2026-01-01</td></tr></table>",
            meta(),
        );
        assert_eq!(d.tables.len(), 1);
        assert_eq!(d.tables["Important Dates"], vec![vec!["Start".to_string(), "2026-01-01".to_string()]]);
    }

    #[test]
    fn zero_row_table_never_appears() {
        let d = parse_doc("<h2>Empty</h2><table><tr></tr></table>", meta());
        assert!(d.tables.is_empty());
    }

    #[test]
    fn headingless_table_is_dropped() {
        let d = parse_doc("<div><table><tr><td>x</td></tr></table></div>", meta());
        assert!(d.tables.is_empty());
    }

    #[test]
    fn nearest_ancestor_heading_wins() {
        let doc = r#"
            <div id="page">
              <h2>Page Heading</h2>
              <section>
                <h3>Application Fee</h3>
                <div><table><tr><th>Category</th><th>Fee</th></tr><tr><td>General</td><td>Rs. 500</td></tr></table></div>
              </section>
            </div>
        "#;
        let d = parse_doc(doc, meta());
        let rows = &d.tables["Application Fee"];
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["Category", "Fee"]);
        assert_eq!(rows[1], vec!["General", "Rs. 500"]);
    }

    #[test]
    fn heading_heuristic_can_borrow_an_unrelated_heading() {
        // Known limitation: the second table has no heading of its own, so it
        // inherits the first heading found in the shared ancestor.
        let doc = r#"
            <div>
              <div><h2>Vacancy Details</h2><table><tr><td>Constable</td><td>100</td></tr></table></div>
              <div><table><tr><td>Unrelated</td></tr></table></div>
            </div>
        "#;
        let d = parse_doc(doc, meta());
        assert_eq!(d.tables.len(), 1);
        assert_eq!(d.tables["Vacancy Details"], vec![vec!["Unrelated".to_string()]]);
    }

    #[test]
    fn duplicate_heading_keeps_last_rows_first_position() {
        let doc = r#"
            <div><h2>A</h2><table><tr><td>first</td></tr></table></div>
            <div><h2>B</h2><table><tr><td>b</td></tr></table></div>
            <div><h2>A</h2><table><tr><td>second</td></tr></table></div>
        "#;
        let d = parse_doc(doc, meta());
        let keys: Vec<&str> = d.tables.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(d.tables["A"], vec![vec!["second".to_string()]]);
    }

    #[test]
    fn importance_rules() {
        assert!(is_important("Apply Online"));
        assert!(is_important("Download ADMIT Card"));
        assert!(is_important("Official Website"));
        assert!(!is_important("OK"));
        assert!(!is_important("Home"));
        // keyword match is not enough when the text is too short
        assert!(!is_important("app"));
    }

    #[test]
    fn links_counted_and_important_filtered_in_order() {
        let doc = r#"
            <a href="/apply">Apply Online</a>
            <a href="/home">Home</a>
            <a>Result without href</a>
            <a href="/notice">Download Notification</a>
            <a href="/x">   </a>
        "#;
        let d = parse_doc(doc, meta());
        assert_eq!(d.links_count, 3);
        let texts: Vec<&str> = d.important_links.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Apply Online", "Download Notification"]);
        assert!(d.important_links.iter().all(|l| l.is_important));
    }

    #[test]
    fn short_link_labels_are_not_counted() {
        let d = parse_doc(r#"<a href="/a">PDF</a><a href="/b">Here</a><a href="/c">OK</a><a href="/d">Go</a>"#, meta());
        assert_eq!(d.links_count, 1);
        assert!(d.important_links.is_empty());
    }

    #[test]
    fn empty_html_gives_empty_detail() {
        let d = parse_doc("", meta());
        assert_eq!(d.title, None);
        assert!(d.tables.is_empty());
        assert!(d.important_links.is_empty());
        assert_eq!(d.links_count, 0);
    }
}
