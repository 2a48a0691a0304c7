// src/enrich.rs
//
// Optional second pass over normalized records (e.g. an LLM that can read
// "Notify Soon"-style free text). Only fields the normalizer left empty are
// offered to the enricher, and an enricher failure never fails the record.

use thiserror::Error;
use tracing::{debug, warn};

use crate::normalize::{ListingRecord, Record, RecruitmentRecord};

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("enricher unavailable: {0}")]
    Unavailable(String),
    #[error("enricher returned an unusable answer: {0}")]
    BadAnswer(String),
}

pub trait Enricher {
    /// Turn free-form date text into `YYYY-MM-DD`, or `Ok(None)` if it has no date.
    fn normalize_date(&self, raw: &str) -> Result<Option<String>, EnrichError>;
}

/// The default: knows nothing, never fails.
pub struct NullEnricher;

impl Enricher for NullEnricher {
    fn normalize_date(&self, _raw: &str) -> Result<Option<String>, EnrichError> {
        Ok(None)
    }
}

/// Fill gaps in `record` using `enricher`. Returns how many fields were filled.
pub fn enrich_record(enricher: &dyn Enricher, record: &mut Record) -> usize {
    match record {
        Record::Listing(r) => enrich_listing(enricher, r),
        Record::Recruitment(r) => enrich_recruitment(enricher, r),
    }
}

fn enrich_listing(enricher: &dyn Enricher, record: &mut ListingRecord) -> usize {
    let mut filled = 0;
    for item in record.items.iter_mut() {
        if item.status_date_iso.is_some() {
            continue;
        }
        let Some(raw) = item.status_detail.as_deref() else { continue };
        if let Some(iso) = ask(enricher, raw) {
            item.status_date_iso = Some(iso);
            filled += 1;
        }
    }
    filled
}

fn enrich_recruitment(enricher: &dyn Enricher, record: &mut RecruitmentRecord) -> usize {
    let mut filled = 0;
    for d in record.important_dates.iter_mut().filter(|d| d.value_iso.is_none()) {
        if let Some(iso) = ask(enricher, &d.value_text) {
            d.value_iso = Some(iso);
            filled += 1;
        }
    }
    filled
}

fn ask(enricher: &dyn Enricher, raw: &str) -> Option<String> {
    match enricher.normalize_date(raw) {
        Ok(Some(iso)) => {
            debug!(raw, iso = %iso, "enricher filled date");
            Some(iso)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(raw, error = %e, "enricher failed; keeping raw text");
            None
        }
    }
}
