// tests/detail_extract.rs
use chrono::{TimeZone, Utc};

use sarkari_scrape::data::{PageMeta, PageType};
use sarkari_scrape::normalize::{self, RawRecord, Record};
use sarkari_scrape::specs::detail::parse_doc;

const PAGE: &str = r##"
<html><body>
  <h1>UP Police Constable Recruitment 2026</h1>
  <div class="box">
    <h2>Important Dates</h2>
    <table>
      <tr><td>Application Begin</td><td>01 May 2026</td></tr>
      <tr><td>Last Date</td><td>15/06/2026</td></tr>
      <tr><td>Admit Card</td><td>Notify Later</td></tr>
    </table>
  </div>
  <div class="box">
    <h2>Application Fee</h2>
    <table>
      <tr><td>General / OBC</td><td>Rs. 400/-</td></tr>
      <tr><td>SC / ST</td><td>Rs. 0/-</td></tr>
    </table>
  </div>
  <div class="box">
    <h3>Vacancy Details</h3>
    <table>
      <tr><th>Post Name</th><th>Total Post</th></tr>
      <tr><td>Constable</td><td>100</td></tr>
      <tr><td>Sub Inspector</td><td>1,200</td></tr>
    </table>
  </div>
  <p>
    <a href="https://x.test/apply">Apply Online</a>
    <a href="https://x.test/notice.pdf">Download Notification</a>
    <a href="https://x.test/">Home</a>
    <a href="https://x.test/result">Result</a>
    <a href="#">   </a>
    <a href="">Official Website</a>
    <a href="https://x.test/short.pdf">PDF</a>
  </p>
</body></html>
"##;

const REPEATED_HEADINGS: &str = r#"
<html><body>
  <h1>SSC GD Constable 2026</h1>
  <div><h2>Important Dates</h2><table><tr><td>Start</td><td>01 May 2026</td></tr></table></div>
  <div><h2>Application Fee</h2><table><tr><td>General</td><td>Rs. 100</td></tr></table></div>
  <div><h2>Important Dates</h2><table><tr><td>Last Date</td><td>30 May 2026</td></tr></table></div>
  <a href="https://x.test/apply">Apply Online</a>
</body></html>
"#;

fn meta() -> PageMeta {
    PageMeta::new("https://x.test/up-police-constable-2026/", Utc.with_ymd_and_hms(2026, 5, 2, 0, 0, 0).unwrap())
        .with_status(200)
}

#[test]
fn tables_keep_document_order() {
    let d = parse_doc(PAGE, meta());
    assert_eq!(d.title.as_deref(), Some("UP Police Constable Recruitment 2026"));
    let keys: Vec<&str> = d.tables.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["Important Dates", "Application Fee", "Vacancy Details"]);
    assert_eq!(d.tables["Vacancy Details"][0], vec!["Post Name", "Total Post"]);
}

#[test]
fn extraction_is_repeatable() {
    for html in [PAGE, REPEATED_HEADINGS] {
        let a = serde_json::to_string(&parse_doc(html, meta())).unwrap();
        let b = serde_json::to_string(&parse_doc(html, meta())).unwrap();
        assert_eq!(a, b);
    }

    let d = parse_doc(REPEATED_HEADINGS, meta());
    let keys: Vec<&str> = d.tables.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["Important Dates", "Application Fee"]);
    assert_eq!(d.tables["Important Dates"], vec![vec!["Last Date", "30 May 2026"]]);
}

#[test]
fn links_are_counted_and_filtered() {
    let d = parse_doc(PAGE, meta());
    // "PDF", the blank label and the empty href are not counted
    assert_eq!(d.links_count, 4);
    let important: Vec<&str> = d.important_links.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(important, vec!["Apply Online", "Download Notification", "Result"]);
    assert!(d.important_links.iter().all(|l| l.is_important));
}

#[test]
fn normalized_record_types_the_sections() {
    let Record::Recruitment(r) = normalize::normalize(RawRecord::Detail(parse_doc(PAGE, meta()))) else {
        panic!("expected a recruitment record");
    };
    assert_eq!(r.page_type, PageType::Recruitment);

    let dates: Vec<(&str, Option<&str>)> = r
        .important_dates
        .iter()
        .map(|d| (d.key.as_str(), d.value_iso.as_deref()))
        .collect();
    assert_eq!(
        dates,
        vec![
            ("Application Begin", Some("2026-05-01")),
            ("Last Date", Some("2026-06-15")),
            ("Admit Card", None),
        ]
    );

    let fees: Vec<Option<f64>> = r.application_fee.iter().map(|f| f.amount_value).collect();
    assert_eq!(fees, vec![Some(400.0), Some(0.0)]);
    assert!(r.application_fee.iter().all(|f| f.currency == "INR"));

    // The header row has no number, so the parsed counts are summed.
    assert_eq!(r.vacancies.len(), 3);
    assert_eq!(r.vacancies[0].count, None);
    assert_eq!(r.total_posts, Some(1300));
    let kinds: Vec<Option<&str>> = r.useful_links.iter().map(|l| l.kind.as_deref()).collect();
    assert_eq!(kinds, vec![Some("apply"), Some("notification"), Some("result")]);
}

#[test]
fn page_without_tables_or_links() {
    let d = parse_doc("<html><body><h1>Notice</h1><p>Nothing yet.</p></body></html>", meta());
    assert!(d.tables.is_empty());
    assert_eq!(d.links_count, 0);
    assert!(d.important_links.is_empty());
}
