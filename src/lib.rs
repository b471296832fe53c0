//! Scraper and cache for the Nautichandler chandlery storefront.
//!
//! Turns category, homepage and product pages into [`models::Product`]
//! lists for a shopping UI, with every fetch behind a five-minute cache.

pub mod api;
pub mod archiver;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod fields;
pub mod models;
pub mod parser;
pub mod scraper;
pub mod search;
pub mod selectors;

pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use config::ScraperConfig;
pub use error::FetchError;
pub use fetcher::{Fetch, HttpFetcher};
pub use models::{Category, Homepage, ListingResult, Product};
pub use scraper::Scraper;
