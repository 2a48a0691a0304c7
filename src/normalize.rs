// src/normalize.rs
//
// Raw records -> typed records.
//
// Best-effort throughout: a value that does not parse keeps its raw text and
// leaves the structured field empty. Nothing in here returns an error.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::{
    ClassifiedLink, ListingItem, ListingPage, PageType, RecruitmentDetail, StatusCategory, Tables,
};
use crate::specs::detail::IMPORTANT_KEYWORDS;

pub const DEFAULT_CURRENCY: &str = "INR";

/// What the specs hand over.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum RawRecord {
    Listing(ListingPage),
    Detail(RecruitmentDetail),
}

/// What gets serialized when `--normalize` is on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Record {
    Listing(ListingRecord),
    Recruitment(RecruitmentRecord),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub rank: u32,
    pub title: String,
    pub link: String,
    pub status_category: StatusCategory,
    pub status_detail: Option<String>,
    pub status_date_iso: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub page_type: Option<PageType>,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub http_status: Option<u16>,
    pub title: Option<String>,
    pub items: Vec<ListingEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KvDate {
    pub key: String,
    pub value_text: String,
    pub value_iso: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub category: String,
    pub amount_text: String,
    pub currency: String,
    pub amount_value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vacancy {
    pub post_name: String,
    pub count_text: String,
    pub count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentRecord {
    pub page_type: PageType,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub http_status: Option<u16>,
    pub title: Option<String>,
    pub total_posts: Option<u32>,
    pub vacancies: Vec<Vacancy>,
    pub important_dates: Vec<KvDate>,
    pub application_fee: Vec<FeeLine>,
    pub useful_links: Vec<Link>,
    pub tables: Tables,
}

pub fn normalize(raw: RawRecord) -> Record {
    match raw {
        RawRecord::Listing(page) => Record::Listing(normalize_listing(page)),
        RawRecord::Detail(detail) => Record::Recruitment(normalize_detail(detail)),
    }
}

pub fn normalize_listing(page: ListingPage) -> ListingRecord {
    let items = page.items.into_iter().map(normalize_item).collect();
    ListingRecord {
        page_type: page.page_type,
        source_url: page.source_url,
        fetched_at: page.fetched_at,
        http_status: page.http_status,
        title: page.title,
        items,
    }
}

fn normalize_item(item: ListingItem) -> ListingEntry {
    let status_date_iso = item.status_detail.as_deref().and_then(parse_date_iso);
    ListingEntry {
        rank: item.rank,
        title: item.title,
        link: item.link,
        status_category: item.status_category,
        status_detail: item.status_detail,
        status_date_iso,
    }
}

/* ---------------- Detail ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Dates,
    Fees,
    Vacancies,
    Other,
}

fn section_for(heading: &str) -> Section {
    let lc = heading.to_lowercase();
    if lc.contains("date") {
        Section::Dates
    } else if lc.contains("fee") {
        Section::Fees
    } else if lc.contains("vacanc") || lc.contains("post") {
        Section::Vacancies
    } else {
        Section::Other
    }
}

pub fn normalize_detail(detail: RecruitmentDetail) -> RecruitmentRecord {
    let mut important_dates = Vec::new();
    let mut application_fee = Vec::new();
    let mut vacancies = Vec::new();

    for (heading, rows) in &detail.tables {
        let section = section_for(heading);
        if section == Section::Other {
            continue;
        }
        for (key, value) in rows.iter().filter_map(|r| row_pair(r)) {
            match section {
                Section::Dates => important_dates.push(KvDate {
                    value_iso: parse_date_iso(&value),
                    key,
                    value_text: value,
                }),
                Section::Fees => application_fee.push(FeeLine {
                    amount_value: parse_amount(&value),
                    category: key,
                    amount_text: value,
                    currency: s!(DEFAULT_CURRENCY),
                }),
                Section::Vacancies => vacancies.push(Vacancy {
                    count: parse_count(&value),
                    post_name: key,
                    count_text: value,
                }),
                Section::Other => {}
            }
        }
    }

    let total_posts = total_posts(&mut vacancies);
    let useful_links = detail.important_links.iter().map(to_link).collect();

    RecruitmentRecord {
        page_type: PageType::Recruitment,
        source_url: detail.source_url,
        fetched_at: detail.fetched_at,
        http_status: detail.http_status,
        title: detail.title,
        total_posts,
        vacancies,
        important_dates,
        application_fee,
        useful_links,
        tables: detail.tables,
    }
}

/// `[key, value, ...]` or a single `"key: value"` cell.
fn row_pair(row: &[String]) -> Option<(String, String)> {
    match row {
        [] => None,
        [single] => {
            let (k, v) = single.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            if k.is_empty() || v.is_empty() {
                return None;
            }
            Some((s!(k), s!(v)))
        }
        [key, rest @ ..] => {
            let value = rest
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Some((key.trim().to_string(), value))
        }
    }
}

/// A "Total" row wins; otherwise sum whatever parsed. The total row itself is
/// kept out of the vacancy list. A sum that does not fit in `u32` is absent.
fn total_posts(vacancies: &mut Vec<Vacancy>) -> Option<u32> {
    if let Some(pos) = vacancies
        .iter()
        .position(|v| v.post_name.to_lowercase().contains("total"))
    {
        let total = vacancies.remove(pos);
        if total.count.is_some() {
            return total.count;
        }
    }
    let mut counts = vacancies.iter().filter_map(|v| v.count).peekable();
    counts.peek()?;
    counts.try_fold(0u32, |acc, n| acc.checked_add(n))
}

fn to_link(l: &ClassifiedLink) -> Link {
    let lc = l.text.to_lowercase();
    let kind = IMPORTANT_KEYWORDS
        .iter()
        .find(|k| lc.contains(*k))
        .map(|k| s!(*k));
    Link {
        label: l.text.clone(),
        url: l.url.clone(),
        kind,
    }
}

/* ---------------- Field parsers ---------------- */

static WORD_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]{3,9})\.?,?\s+(\d{4})\b").unwrap());
static NUMERIC_DMY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4})\b").unwrap());
static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());
static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());

/// First recognizable date in `text` as `YYYY-MM-DD`.
pub fn parse_date_iso(text: &str) -> Option<String> {
    parse_date(text).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Some(c) = ISO_RE.captures(text) {
        if let Some(d) = ymd(&c[1], &c[2], &c[3]) {
            return Some(d);
        }
    }
    if let Some(c) = WORD_DATE_RE.captures(text) {
        // %B accepts full and abbreviated month names.
        let candidate = format!("{} {} {}", &c[1], &c[2], &c[3]);
        if let Ok(d) = NaiveDate::parse_from_str(&candidate, "%d %B %Y") {
            return Some(d);
        }
    }
    if let Some(c) = NUMERIC_DMY_RE.captures(text) {
        return ymd(&c[3], &c[2], &c[1]);
    }
    None
}

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// First number in `text`, thousands separators dropped.
pub fn parse_amount(text: &str) -> Option<f64> {
    let m = AMOUNT_RE.find(text)?;
    m.as_str().replace(',', "").parse().ok()
}

pub fn parse_count(text: &str) -> Option<u32> {
    let m = COUNT_RE.find(text)?;
    m.as_str().replace(',', "").parse().ok()
}
