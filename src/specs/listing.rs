// src/specs/listing.rs
//! Scraping *spec* for aggregator listing pages
//! (`/latest-jobs/`, `/admit-card/`, `/result/`, `/answer-key/`).
//!
//! Every `<li>` carrying an `a[href]` with non-empty text and href becomes one
//! ranked `ListingItem`. Anything else is dropped without a trace.
//!
//! Status precedence (first match wins):
//! 1. item text contains `Last Date:` → `Active` (+ the date token, if any)
//! 2. link text contains `– Out`      → `Out`
//! 3. link text contains `– Pending`  → `Pending`
//! 4. otherwise                        → `Unknown`

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::html::{Document, Node};
use crate::data::{ListingItem, ListingPage, PageMeta, StatusCategory};

const LAST_DATE_MARKER: &str = "Last Date:";
// The site uses an en dash (U+2013) in its status suffixes.
const OUT_MARKER: &str = "\u{2013} Out";
const PENDING_MARKER: &str = "\u{2013} Pending";

static LAST_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Last Date:\s*(\d{1,2}\s+\w+\s+\d{4})").unwrap());

/// Split out for unit tests.
pub fn parse_doc(html_doc: &str, meta: PageMeta) -> ListingPage {
    let doc = Document::parse(html_doc);
    extract_listing(&doc, meta)
}

pub fn extract_listing(doc: &Document, meta: PageMeta) -> ListingPage {
    let title = doc
        .select_first("h1")
        .map(|h| h.text())
        .filter(|t| !t.is_empty());

    let mut items: Vec<ListingItem> = Vec::new();
    let mut skipped = 0usize;

    for li in doc.select("li") {
        match read_item(&li, items.len() as u32 + 1) {
            Some(item) => items.push(item),
            None => skipped += 1,
        }
    }

    debug!(
        url = %meta.source_url,
        items = items.len(),
        skipped,
        "listing extracted"
    );

    ListingPage {
        source_url: meta.source_url,
        fetched_at: meta.fetched_at,
        http_status: meta.http_status,
        page_type: meta.page_type,
        title,
        items,
    }
}

fn read_item(li: &Node<'_>, rank: u32) -> Option<ListingItem> {
    let anchor = li.select_first("a[href]")?;

    let link_text = anchor.text();
    let link_url = anchor.attr("href").unwrap_or("").trim().to_string();
    if link_text.is_empty() || link_url.is_empty() {
        return None;
    }

    // Dates usually sit next to the anchor, not inside it.
    let full_text = li.text();
    let (status_category, status_detail) = classify(&link_text, &full_text);

    Some(ListingItem {
        rank,
        title: link_text,
        link: link_url,
        status_category,
        status_detail,
    })
}

/// Status for one item. Pure; exposed for reuse by callers re-classifying saved rows.
pub fn classify(link_text: &str, full_text: &str) -> (StatusCategory, Option<String>) {
    if full_text.contains(LAST_DATE_MARKER) {
        let date = LAST_DATE_RE
            .captures(full_text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        return (StatusCategory::Active, date);
    }
    if link_text.contains(OUT_MARKER) {
        return (StatusCategory::Out, None);
    }
    if link_text.contains(PENDING_MARKER) {
        return (StatusCategory::Pending, None);
    }
    (StatusCategory::Unknown, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn meta() -> PageMeta {
        PageMeta::new("https://example.test/latest-jobs/", Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn single_out_item() {
        let page = parse_doc(r#"<ul><li><a href="/x">Job A – Out</a></li></ul>"#, meta());
        assert_eq!(page.items.len(), 1);
        let it = &page.items[0];
        assert_eq!(it.rank, 1);
        assert_eq!(it.title, "Job A – Out");
        assert_eq!(it.link, "/x");
        assert_eq!(it.status_category, StatusCategory::Out);
        assert_eq!(it.status_detail, None);
    }

    #[test]
    fn last_date_wins_over_link_suffix() {
        let doc = r#"
            <ul>
              <li><a href="/p">Police Constable – Out</a> Last Date: 15 June 2026</li>
            </ul>
        "#;
        let page = parse_doc(doc, meta());
        let it = &page.items[0];
        assert_eq!(it.status_category, StatusCategory::Active);
        assert_eq!(it.status_detail.as_deref(), Some("15 June 2026"));
    }

    #[test]
    fn last_date_without_token_is_active_without_detail() {
        let page = parse_doc(r#"<li><a href="/p">Clerk</a> Last Date: Soon</li>"#, meta());
        assert_eq!(page.items[0].status_category, StatusCategory::Active);
        assert_eq!(page.items[0].status_detail, None);
    }

    #[test]
    fn three_digit_day_is_not_a_date() {
        let (cat, detail) = classify("x", "Last Date: 123 June 2026");
        assert_eq!(cat, StatusCategory::Active);
        assert_eq!(detail, None);
    }

    #[test]
    fn pending_and_unknown() {
        assert_eq!(classify("Exam – Pending", "Exam – Pending").0, StatusCategory::Pending);
        assert_eq!(classify("Exam - Out", "Exam - Out").0, StatusCategory::Unknown); // ascii hyphen
        assert_eq!(classify("Exam", "Exam").0, StatusCategory::Unknown);
    }

    #[test]
    fn ranks_are_dense_over_accepted_items() {
        let doc = r#"
            <ul>
              <li>no anchor</li>
              <li><a href="/1">One</a></li>
              <li><a>no href</a></li>
              <li><a href="/2">   </a></li>
              <li><a href="  ">blank href</a></li>
              <li><a href="/3">Three</a><a href="/ignored">Second anchor</a></li>
            </ul>
        "#;
        let page = parse_doc(doc, meta());
        let got: Vec<(u32, &str, &str)> = page
            .items
            .iter()
            .map(|i| (i.rank, i.title.as_str(), i.link.as_str()))
            .collect();
        assert_eq!(got, vec![(1, "One", "/1"), (2, "Three", "/3")]);
    }

    #[test]
    fn title_from_first_h1_and_meta_passthrough() {
        let m = meta().with_status(200);
        let page = parse_doc("<h1> Latest Jobs </h1><h1>Other</h1>", m.clone());
        assert_eq!(page.title.as_deref(), Some("Latest Jobs"));
        assert_eq!(page.source_url, m.source_url);
        assert_eq!(page.fetched_at, m.fetched_at);
        assert_eq!(page.http_status, Some(200));
        assert!(page.items.is_empty());
    }

    #[test]
    fn empty_html_gives_empty_page() {
        let page = parse_doc("", meta());
        assert_eq!(page.title, None);
        assert!(page.items.is_empty());
    }
}
