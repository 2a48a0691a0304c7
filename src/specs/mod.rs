// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction for the portal. Each spec knows *where the data
//! lives in the HTML* of one kind of page and turns an already-fetched
//! document into a raw record.
//!
//! ## What lives here
//! - **Pure extraction** over `core::html::Document` (CSS selectors, trimmed
//!   text, attributes, parent walks).
//! - **Classification rules** (listing status markers, important-link keywords,
//!   nearest-heading lookup for tables).
//! - A `parse_doc(html, meta)` entry per spec so fixtures can be tested offline.
//!
//! ## What does **not** live here
//! - **Networking / retries** (`core::net`) and the worker pool (`scrape`).
//! - **Typed normalization** (ISO dates, numeric amounts) – see `normalize`.
//! - **Export** (`file`, `csv`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::scrape_* → Fetcher::fetch → specs::<page>::parse_doc
//!                                        ↘ raw record → normalize → file
//! ```
//!
//! ## Conventions & invariants
//! - Never fail on content: a missing field is `None`, a page with nothing
//!   recognizable is an empty record.
//! - Caller metadata (`PageMeta`) is copied through untouched; specs never read
//!   the clock.
//! - Output order follows document order.
//!
//! ## Current specs
//! - `listing` – aggregator pages (latest jobs, admit cards, results, answer keys).
//! - `detail` – a single recruitment page (tables by heading, important links).
pub mod detail;
pub mod listing;
