// src/scrape.rs
//
// Fetch → extract glue. Specs stay pure; this layer owns the network side,
// the caller metadata and the bounded worker pool for multi-page runs.

use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use tracing::{error, info};

use crate::{
    config::{AggregatorConfig, ScraperConfig},
    core::net::{FetchError, FetchedPage, Fetcher},
    data::{ListingPage, PageMeta, PageType, RecruitmentDetail},
    progress::Progress,
    specs::{detail, listing},
};

/// One page to scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub page_type: Option<PageType>,
}

impl Target {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), page_type: None }
    }

    pub fn with_page_type(mut self, page_type: PageType) -> Self {
        self.page_type = Some(page_type);
        self
    }
}

/// Every configured aggregator page, in config order.
pub fn aggregator_targets(aggregator: &AggregatorConfig) -> Vec<Target> {
    aggregator
        .pages
        .iter()
        .map(|(key, url)| Target {
            url: url.clone(),
            page_type: PageType::from_aggregator_key(key),
        })
        .collect()
}

/// A page that could not be scraped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub url: String,
    pub reason: String,
}

/// Successful pages in input order, plus whatever failed.
#[derive(Debug)]
pub struct Collected<T> {
    pub pages: Vec<T>,
    pub failures: Vec<Failure>,
}

pub fn page_meta(target: &Target, page: &FetchedPage) -> PageMeta {
    PageMeta {
        source_url: target.url.clone(),
        fetched_at: page.fetched_at,
        http_status: Some(page.status),
        page_type: target.page_type,
    }
}

pub fn scrape_listing(fetcher: &dyn Fetcher, target: &Target) -> Result<ListingPage, FetchError> {
    let page = fetcher.fetch(&target.url)?;
    let t = std::time::Instant::now();
    let out = listing::parse_doc(&page.html, page_meta(target, &page));
    info!(url = %target.url, items = out.items.len(), parse = ?t.elapsed(), "listing scraped");
    Ok(out)
}

pub fn scrape_detail(fetcher: &dyn Fetcher, target: &Target) -> Result<RecruitmentDetail, FetchError> {
    let page = fetcher.fetch(&target.url)?;
    let t = std::time::Instant::now();
    let out = detail::parse_doc(&page.html, page_meta(target, &page));
    info!(
        url = %target.url,
        tables = out.tables.len(),
        important_links = out.important_links.len(),
        parse = ?t.elapsed(),
        "detail scraped"
    );
    Ok(out)
}

pub fn collect_listings(
    fetcher: &(dyn Fetcher + Sync),
    targets: &[Target],
    cfg: &ScraperConfig,
    progress: Option<&mut dyn Progress>,
) -> Collected<ListingPage> {
    run_pool(targets, cfg.concurrent_jobs, cfg.request_pause, progress, |t| scrape_listing(fetcher, t))
}

pub fn collect_details(
    fetcher: &(dyn Fetcher + Sync),
    targets: &[Target],
    cfg: &ScraperConfig,
    progress: Option<&mut dyn Progress>,
) -> Collected<RecruitmentDetail> {
    run_pool(targets, cfg.concurrent_jobs, cfg.request_pause, progress, |t| scrape_detail(fetcher, t))
}

/// `workers` threads pull indices from a shared counter; results come back
/// over a channel and are slotted by index so output order matches input.
fn run_pool<T, F>(
    targets: &[Target],
    workers: usize,
    pause: Duration,
    mut progress: Option<&mut dyn Progress>,
    job: F,
) -> Collected<T>
where
    T: Send,
    F: Fn(&Target) -> Result<T, FetchError> + Sync,
{
    if let Some(p) = progress.as_deref_mut() {
        p.begin(targets.len());
    }

    let mut slots: Vec<Option<T>> = (0..targets.len()).map(|_| None).collect();
    let mut failures: Vec<(usize, Failure)> = Vec::new();

    let counter = AtomicUsize::new(0);
    let workers = workers.min(targets.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<T, String>)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            let job = &job;
            scope.spawn(move || loop {
                let i = counter.fetch_add(1, Ordering::Relaxed);
                if i >= targets.len() {
                    break;
                }
                let result = job(&targets[i]).map_err(|e| e.to_string());
                if tx.send((i, result)).is_err() {
                    break;
                }
                if !pause.is_zero() {
                    thread::sleep(pause); // be polite
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        for (i, result) in res_rx {
            let url = targets[i].url.as_str();
            match result {
                Ok(page) => {
                    slots[i] = Some(page);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(url);
                    }
                }
                Err(reason) => {
                    error!(url, %reason, "page failed");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(url, &reason);
                    }
                    failures.push((i, Failure { url: s!(url), reason }));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    failures.sort_by_key(|(i, _)| *i);
    Collected {
        pages: slots.into_iter().flatten().collect(),
        failures: failures.into_iter().map(|(_, f)| f).collect(),
    }
}
