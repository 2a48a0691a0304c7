// src/cli.rs
use std::{fs, path::PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::{AppConfig, consts::{DEFAULT_ALL_FILE, DEFAULT_DETAIL_FILE, DEFAULT_LISTING_FILE}},
    core::{net::HttpFetcher, sanitize::stem_for_url},
    data::{ListingPage, PageMeta, PageType},
    enrich::{NullEnricher, enrich_record},
    file::{
        ExportError, ExportFormat, default_filename, resolve_single_out_path, to_csv, to_json,
        write_export, write_stdout,
    },
    normalize::{RawRecord, Record, normalize},
    progress::Progress,
    scrape::{self, Target},
    specs::{detail, listing},
};

/// Job-portal scraper: listing pages, recruitment pages, offline parsing.
#[derive(Debug, Parser)]
#[command(name = "sarkari_scrape", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output file or directory (trailing separator = directory). Stdout when absent.
    #[arg(short, long, global = true)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    pub format: Format,

    /// Emit typed records (ISO dates, amounts, vacancies).
    #[arg(long, global = true)]
    pub normalize: bool,

    /// Single-line JSON.
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One listing page, by configured key (`latest_jobs`, ...) or URL.
    Listing { page: String },
    /// One recruitment page.
    Detail { url: String },
    /// Every configured listing page.
    All,
    /// Extract from a saved HTML file, no network.
    Parse {
        file: PathBuf,
        #[arg(long, value_enum)]
        kind: Kind,
        /// Recorded as the source URL (defaults to the file path).
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f { Format::Json => ExportFormat::Json, Format::Csv => ExportFormat::Csv }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Listing,
    Detail,
}

pub fn run(cli: Cli, cfg: &AppConfig) -> Result<()> {
    match &cli.command {
        Command::Listing { page } => {
            let (target, stem) = listing_target(page, cfg)?;
            let fetcher = HttpFetcher::new(&cfg.scraper)?;
            let out = scrape::scrape_listing(&fetcher, &target)
                .wrap_err_with(|| format!("listing {} failed", target.url))?;
            emit(&cli, vec![RawRecord::Listing(out)], false, &stem)
        }
        Command::Detail { url } => {
            let fetcher = HttpFetcher::new(&cfg.scraper)?;
            let out = scrape::scrape_detail(&fetcher, &Target::new(url.as_str()))
                .wrap_err_with(|| format!("detail {url} failed"))?;
            emit(&cli, vec![RawRecord::Detail(out)], false, &stem_for_url(url, DEFAULT_DETAIL_FILE))
        }
        Command::All => {
            let targets = scrape::aggregator_targets(&cfg.aggregator);
            let fetcher = HttpFetcher::new(&cfg.scraper)?;
            let mut progress = CliProgress::default();
            let collected = scrape::collect_listings(&fetcher, &targets, &cfg.scraper, Some(&mut progress));

            if collected.pages.is_empty() && !collected.failures.is_empty() {
                bail!("all {} listing pages failed", collected.failures.len());
            }
            if !collected.failures.is_empty() {
                progress.log(&format!(
                    "{} of {} pages failed; exporting the rest",
                    collected.failures.len(),
                    targets.len()
                ));
            }
            let raws = collected.pages.into_iter().map(RawRecord::Listing).collect();
            emit(&cli, raws, true, DEFAULT_ALL_FILE)
        }
        Command::Parse { file, kind, url } => {
            let html = fs::read_to_string(file)
                .wrap_err_with(|| format!("could not read {}", file.display()))?;
            let source = url.clone().unwrap_or_else(|| file.display().to_string());
            let meta = PageMeta::new(source.as_str(), Utc::now());
            let (raw, fallback) = match kind {
                Kind::Listing => (RawRecord::Listing(listing::parse_doc(&html, meta)), DEFAULT_LISTING_FILE),
                Kind::Detail => (RawRecord::Detail(detail::parse_doc(&html, meta)), DEFAULT_DETAIL_FILE),
            };
            emit(&cli, vec![raw], false, &stem_for_url(&source, fallback))
        }
    }
}

/// Configured key first, then anything that looks like a URL.
fn listing_target(page: &str, cfg: &AppConfig) -> Result<(Target, String)> {
    if let Some(url) = cfg.aggregator.url_for(page) {
        let mut target = Target::new(url);
        target.page_type = PageType::from_aggregator_key(page);
        return Ok((target, s!(page)));
    }
    if page.starts_with("http://") || page.starts_with("https://") {
        return Ok((Target::new(page), stem_for_url(page, DEFAULT_LISTING_FILE)));
    }
    let known: Vec<&str> = cfg.aggregator.pages.keys().map(|k| k.as_str()).collect();
    Err(eyre!("unknown listing page {page:?}; expected a URL or one of: {}", known.join(", ")))
}

fn emit(cli: &Cli, raws: Vec<RawRecord>, many: bool, stem: &str) -> Result<()> {
    let format = ExportFormat::from(cli.format);
    let contents = match format {
        ExportFormat::Json => render_json(raws, many, cli.normalize, cli.compact)?,
        ExportFormat::Csv => {
            if cli.normalize {
                warn!("--normalize has no effect on CSV output");
            }
            to_csv(&listing_pages(raws)?)
        }
    };

    match cli.out.as_deref() {
        Some(o) => {
            let path = resolve_single_out_path(o, &default_filename(stem, format))?;
            let written = write_export(&path, &contents)?;
            info!(path = %written.display(), "export written");
            eprintln!("Wrote {}", written.display());
        }
        None => write_stdout(&contents)?,
    }
    Ok(())
}

fn render_json(raws: Vec<RawRecord>, many: bool, normalize_on: bool, compact: bool) -> Result<String, ExportError> {
    if !normalize_on {
        return one_or_many(&raws, many, compact);
    }
    let enricher = NullEnricher;
    let mut records: Vec<Record> = raws.into_iter().map(normalize).collect();
    for r in records.iter_mut() {
        enrich_record(&enricher, r);
    }
    one_or_many(&records, many, compact)
}

fn one_or_many<T: Serialize>(items: &[T], many: bool, compact: bool) -> Result<String, ExportError> {
    match items {
        [one] if !many => to_json(one, compact),
        _ => to_json(items, compact),
    }
}

fn listing_pages(raws: Vec<RawRecord>) -> Result<Vec<ListingPage>, ExportError> {
    raws.into_iter()
        .map(|r| match r {
            RawRecord::Listing(p) => Ok(p),
            RawRecord::Detail(_) => Err(ExportError::CsvNeedsListing),
        })
        .collect()
}

/// Prints one line per page to stderr.
#[derive(Default)]
struct CliProgress {
    total: usize,
    seen: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Scraping {} pages...", total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, url: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] ok   {}", self.seen, self.total, url);
    }
    fn item_failed(&mut self, url: &str, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] FAIL {} ({})", self.seen, self.total, url, reason);
    }
    fn finish(&mut self) {
        eprintln!("Done.");
    }
}
