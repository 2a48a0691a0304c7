// src/data.rs
//
// Raw extraction records, exactly as the page specs produce them.
//
// - ListingPage / ListingItem: aggregator pages (jobs, results, admit cards,
//   answer keys), one ranked item per accepted <li>.
// - RecruitmentDetail / ClassifiedLink: a single recruitment page, tables
//   keyed by their nearest heading plus keyword-classified links.
//
// Typed, normalized shapes live in `crate::normalize`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Recruitment,
    Result,
    AdmitCard,
    AnswerKey,
    AggregatorJobs,
    AggregatorAdmitCard,
    AggregatorResult,
    AggregatorAnswerKey,
}

impl PageType {
    /// Map an aggregator page key from the config (`latest_jobs`, ...) to its type.
    pub fn from_aggregator_key(key: &str) -> Option<Self> {
        match key {
            "latest_jobs" => Some(Self::AggregatorJobs),
            "admit_card" => Some(Self::AggregatorAdmitCard),
            "result" => Some(Self::AggregatorResult),
            "answer_key" => Some(Self::AggregatorAnswerKey),
            _ => None,
        }
    }
}

/// Caller-supplied facts about a fetched page. Extractors never compute these.
#[derive(Clone, Debug, PartialEq)]
pub struct PageMeta {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub http_status: Option<u16>,
    pub page_type: Option<PageType>,
}

impl PageMeta {
    pub fn new(source_url: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            source_url: source_url.into(),
            fetched_at,
            http_status: None,
            page_type: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_page_type(mut self, page_type: PageType) -> Self {
        self.page_type = Some(page_type);
        self
    }
}

/* ---------------- Listing ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCategory {
    Active,
    Out,
    Pending,
    Unknown,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Active => "Active",
            StatusCategory::Out => "Out",
            StatusCategory::Pending => "Pending",
            StatusCategory::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingItem {
    /// 1-based, dense over accepted items only.
    pub rank: u32,
    pub title: String,
    /// As found in the page; may be relative.
    pub link: String,
    pub status_category: StatusCategory,
    pub status_detail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub http_status: Option<u16>,
    pub page_type: Option<PageType>,
    pub title: Option<String>,
    pub items: Vec<ListingItem>,
}

/* ---------------- Detail ---------------- */

/// Heading → rows. Insertion-ordered so output is stable run to run.
pub type Tables = IndexMap<String, Vec<Vec<String>>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailTable {
    pub heading: String,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLink {
    pub text: String,
    pub url: String,
    pub is_important: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentDetail {
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    pub http_status: Option<u16>,
    pub title: Option<String>,
    pub tables: Tables,
    pub links_count: usize,
    pub important_links: Vec<ClassifiedLink>,
}
