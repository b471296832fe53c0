//! Cached scrape operations against the storefront.
//!
//! Every operation consults the shared [`TtlCache`] before touching the
//! network, and the raw HTML of each page is cached on its own as well. Two
//! callers missing on the same key at once both fetch; the later write wins.

use log::debug;
use std::sync::Arc;

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::catalog;
use crate::config::ScraperConfig;
use crate::error::FetchError;
use crate::fetcher::{Fetch, HttpFetcher};
use crate::models::{Category, Homepage, ListingResult, Product};
use crate::parser::{ListingExtractor, parse_product_detail};

/// Payloads stored in the shared cache.
#[derive(Debug, Clone)]
pub enum Cached {
    Html(String),
    Listing(ListingResult),
    Homepage(Homepage),
    Products(Vec<Product>),
    Detail(Product),
}

pub struct Scraper {
    config: ScraperConfig,
    fetcher: Arc<dyn Fetch>,
    cache: TtlCache<Cached>,
    listing: ListingExtractor,
    featured: ListingExtractor,
}

impl Scraper {
    /// Scraper over HTTP with the system clock.
    pub fn new(config: ScraperConfig) -> Result<Self, reqwest::Error> {
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_parts(config, fetcher, Arc::new(SystemClock)))
    }

    pub fn with_parts(
        config: ScraperConfig,
        fetcher: Arc<dyn Fetch>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = TtlCache::with_clock(config.cache_ttl(), clock);
        Self {
            config,
            fetcher,
            cache,
            listing: ListingExtractor::listing(),
            featured: ListingExtractor::featured(),
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub(crate) fn cache(&self) -> &TtlCache<Cached> {
        &self.cache
    }

    pub fn categories(&self) -> Vec<Category> {
        catalog::categories(&self.config.base_url)
    }

    pub fn find_category(&self, slug: &str) -> Option<Category> {
        catalog::find_by_slug(&self.config.base_url, slug)
    }

    /// Raw HTML of `url`, cached under `html:<url>`.
    pub fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let key = format!("html:{url}");
        if let Some(Cached::Html(html)) = self.cache.get(&key) {
            return Ok(html);
        }

        let html = self.fetcher.fetch(url)?;
        self.cache.set(key, Cached::Html(html.clone()));
        Ok(html)
    }

    /// One listing page of `category`. Page 1 is the category URL itself.
    pub fn scrape_products(
        &self,
        category: &Category,
        page: u32,
    ) -> Result<ListingResult, FetchError> {
        let key = format!("products:{}:{page}", category.url);
        if let Some(Cached::Listing(result)) = self.cache.get(&key) {
            return Ok(result);
        }

        let url = if page > 1 {
            format!("{}?page={page}", category.url)
        } else {
            category.url.clone()
        };
        let html = self.fetch_page(&url)?;

        let mut result = self.listing.extract(&html, &self.config.origin);
        for product in &mut result.products {
            product.category = Some(category.slug.clone());
        }
        debug!(
            "{} page {page}: {} products of {} pages",
            category.slug,
            result.products.len(),
            result.total_pages
        );

        self.cache.set(key, Cached::Listing(result.clone()));
        Ok(result)
    }

    /// Featured products plus the static catalog.
    pub fn scrape_homepage(&self) -> Result<Homepage, FetchError> {
        if let Some(Cached::Homepage(homepage)) = self.cache.get("homepage") {
            return Ok(homepage);
        }

        let html = self.fetch_page(&self.config.base_url)?;
        let homepage = Homepage {
            products: self.featured.extract(&html, &self.config.origin).products,
            categories: self.categories(),
        };

        self.cache.set("homepage", Cached::Homepage(homepage.clone()));
        Ok(homepage)
    }

    /// Product page at `url`; `Ok(None)` when the page shows no product.
    pub fn scrape_product_detail(&self, url: &str) -> Result<Option<Product>, FetchError> {
        let key = format!("detail:{url}");
        if let Some(Cached::Detail(product)) = self.cache.get(&key) {
            return Ok(Some(product));
        }

        let html = self.fetch_page(url)?;
        let Some(product) = parse_product_detail(&html, url, &self.config.origin) else {
            return Ok(None);
        };

        self.cache.set(key, Cached::Detail(product.clone()));
        Ok(Some(product))
    }

    /// Products whose name contains `query`. Never fails; see [`crate::search`].
    pub fn search(&self, query: &str) -> Vec<Product> {
        crate::search::search(self, query)
    }
}
