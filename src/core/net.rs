// src/core/net.rs
//! Page fetching.
//!
//! Extraction never touches the network; it consumes `FetchedPage`s produced
//! by a `Fetcher`. `HttpFetcher` is the real one (blocking reqwest, fixed
//! user agent, timeout, retry with delay). Tests substitute their own.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::options::ScraperConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("could not read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// One successful GET.
#[derive(Clone, Debug)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(cfg: &ScraperConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            max_retries: cfg.max_retries,
            retry_delay: cfg.retry_delay,
        })
    }

    fn get_once(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let resp = self.client.get(url).send().map_err(|source| FetchError::Network {
            url: s!(url),
            source,
        })?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        if !status.is_success() {
            return Err(FetchError::Status { url: final_url, status: status.as_u16() });
        }

        let html = resp.text().map_err(|source| FetchError::Body {
            url: final_url.clone(),
            source,
        })?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            html,
            fetched_at: Utc::now(),
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let t = std::time::Instant::now();
        let page = with_retries(self.max_retries, self.retry_delay, url, || self.get_once(url))?;
        info!(url, status = page.status, bytes = page.html.len(), elapsed = ?t.elapsed(), "fetched");
        Ok(page)
    }
}

/// Run `op` up to `attempts` times (at least once), sleeping `delay` between
/// tries. Returns the first success or the last error.
pub fn with_retries<T>(
    attempts: u32,
    delay: Duration,
    url: &str,
    mut op: impl FnMut() -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if attempt >= attempts => {
                warn!(url, attempt, error = %e, "giving up");
                return Err(e);
            }
            Err(e) => {
                debug!(url, attempt, error = %e, "fetch failed; retrying");
                attempt += 1;
                thread::sleep(delay);
            }
        }
    }
}
