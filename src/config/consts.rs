// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://sarkariresult.com.cm";
pub const USER_AGENT: &str = "SarkariSetuBot/1.0 (+contact: dev@sarkarisetu.com)";
pub const TIMEOUT_SECS: u64 = 30;
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_SECS: u64 = 5;

// Aggregator pages (key, path under BASE_URL)
pub const AGGREGATOR_PAGES: [(&str, &str); 4] = [
    ("latest_jobs", "/latest-jobs/"),
    ("admit_card", "/admit-card/"),
    ("result", "/result/"),
    ("answer_key", "/answer-key/"),
];

// Concurrency
pub const CONCURRENT_JOBS: usize = 3;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite

// Logging
pub const LOG_LEVEL: &str = "info";
pub const LOG_FILE: &str = "logs/sarkarisetu.log";

// Export
pub const DEFAULT_LISTING_FILE: &str = "listing";
pub const DEFAULT_DETAIL_FILE: &str = "detail";
pub const DEFAULT_ALL_FILE: &str = "listings";
