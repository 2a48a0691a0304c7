// src/csv.rs
use std::io::{self, Write};

use crate::data::ListingPage;

pub const LISTING_HEADERS: [&str; 5] = ["Rank", "Title", "Link", "Status", "Detail"];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Flatten listing items into rows (rank, title, link, status, detail).
pub fn listing_rows(page: &ListingPage) -> Vec<Vec<String>> {
    page.items
        .iter()
        .map(|it| vec![
            it.rank.to_string(),
            it.title.clone(),
            it.link.clone(),
            s!(it.status_category.as_str()),
            it.status_detail.clone().unwrap_or_default(),
        ])
        .collect()
}

/// Whole export as a string; header line optional.
pub fn listing_to_string(pages: &[ListingPage], include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if include_headers {
        let _ = write_row(&mut buf, &LISTING_HEADERS, sep);
    }
    for page in pages {
        for r in listing_rows(page) {
            let _ = write_row(&mut buf, &r, sep);
        }
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ListingItem, StatusCategory};
    use chrono::{TimeZone, Utc};

    fn page() -> ListingPage {
        ListingPage {
            source_url: s!("https://x.test/"),
            fetched_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            http_status: None,
            page_type: None,
            title: None,
            items: vec![
                ListingItem {
                    rank: 1,
                    title: s!("SSC CGL, 2026"),
                    link: s!("/ssc"),
                    status_category: StatusCategory::Active,
                    status_detail: Some(s!("15 June 2026")),
                },
                ListingItem {
                    rank: 2,
                    title: s!("Say \"hi\""),
                    link: s!("/q"),
                    status_category: StatusCategory::Unknown,
                    status_detail: None,
                },
            ],
        }
    }

    #[test]
    fn quotes_only_when_needed() {
        let s = listing_to_string(&[page()], true, ',');
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines[0], "Rank,Title,Link,Status,Detail");
        assert_eq!(lines[1], "1,\"SSC CGL, 2026\",/ssc,Active,15 June 2026");
        assert_eq!(lines[2], "2,\"Say \"\"hi\"\"\",/q,Unknown,");
    }

    #[test]
    fn tab_separator_leaves_commas_alone() {
        let s = listing_to_string(&[page()], false, '\t');
        assert!(s.starts_with("1\tSSC CGL, 2026\t/ssc\tActive\t15 June 2026\n"));
    }
}
