// src/config/options.rs
//
// Process configuration. Built once at startup (`AppConfig::from_env`) and
// handed down by reference; nothing in the crate reads the environment on its
// own.

use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use thiserror::Error;

use super::consts::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub aggregator: AggregatorConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let scraper = ScraperConfig::default();
        let aggregator = AggregatorConfig::for_base(&scraper.base_url);
        Self {
            scraper,
            aggregator,
            log: LogConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub concurrent_jobs: usize,
    pub request_pause: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_secs(RETRY_DELAY_SECS),
            concurrent_jobs: CONCURRENT_JOBS,
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

/// Listing pages to crawl, keyed by short name (`latest_jobs`, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub pages: IndexMap<String, String>,
}

impl AggregatorConfig {
    /// Fresh page map rooted at `base_url`. Every call allocates its own map.
    pub fn for_base(base_url: &str) -> Self {
        Self { pages: default_pages(base_url) }
    }

    pub fn url_for(&self, key: &str) -> Option<&str> {
        self.pages.get(key).map(|s| s.as_str())
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::for_base(BASE_URL)
    }
}

pub fn default_pages(base_url: &str) -> IndexMap<String, String> {
    let base = base_url.trim_end_matches('/');
    AGGREGATOR_PAGES
        .iter()
        .map(|(key, path)| (s!(*key), join!(base, path)))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `sarkari_scrape=debug`.
    pub level: String,
    /// Append to this file; `None` logs to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: s!(LOG_LEVEL),
            file: Some(PathBuf::from(LOG_FILE)),
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any), then read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut scraper = ScraperConfig::default();

        if let Some(v) = lookup("SCRAPER_BASE_URL").filter(|v| !v.trim().is_empty()) {
            scraper.base_url = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("SCRAPER_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            scraper.user_agent = v;
        }
        if let Some(v) = lookup("SCRAPER_TIMEOUT") {
            scraper.timeout = Duration::from_secs(parse_num("SCRAPER_TIMEOUT", &v)?);
        }
        if let Some(v) = lookup("SCRAPER_MAX_RETRIES") {
            scraper.max_retries = parse_num("SCRAPER_MAX_RETRIES", &v)?;
        }
        if let Some(v) = lookup("SCRAPER_RETRY_DELAY") {
            scraper.retry_delay = Duration::from_secs(parse_num("SCRAPER_RETRY_DELAY", &v)?);
        }
        if let Some(v) = lookup("SCRAPER_CONCURRENT_JOBS") {
            let n: usize = parse_num("SCRAPER_CONCURRENT_JOBS", &v)?;
            if n == 0 {
                return Err(ConfigError::Invalid {
                    key: "SCRAPER_CONCURRENT_JOBS",
                    value: v,
                    reason: s!("must be at least 1"),
                });
            }
            scraper.concurrent_jobs = n;
        }

        let mut log = LogConfig::default();
        if let Some(v) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            log.level = v.trim().to_lowercase();
        }
        if let Some(v) = lookup("LOG_FILE") {
            // LOG_FILE= (empty) means stderr
            log.file = if v.trim().is_empty() { None } else { Some(PathBuf::from(v.trim())) };
        }

        let aggregator = AggregatorConfig::for_base(&scraper.base_url);
        Ok(Self { scraper, aggregator, log })
    }
}

fn parse_num<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: s!(value),
        reason: e.to_string(),
    })
}
