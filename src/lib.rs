// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod data;
pub mod enrich;
pub mod file;
pub mod log;
pub mod normalize;
pub mod progress;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::html::Document;
pub use data::{
    ClassifiedLink, DetailTable, ListingItem, ListingPage, PageMeta, PageType, RecruitmentDetail,
    StatusCategory,
};
pub use normalize::{normalize, RawRecord, Record};
pub use specs::detail::extract_detail;
pub use specs::listing::extract_listing;
