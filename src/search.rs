//! Free-text product search over a handful of category listings.
//!
//! The query picks up to `max_search_categories` categories through the
//! keyword table, their first pages are fetched concurrently, the homepage's
//! featured products are appended, and the union is filtered by name.

use log::{debug, warn};
use std::collections::HashSet;
use std::thread;

use crate::catalog;
use crate::config::ScraperConfig;
use crate::models::Product;
use crate::scraper::{Cached, Scraper};

/// Categories to scan for `query` (already lower-cased).
pub fn candidate_slugs(query: &str, config: &ScraperConfig) -> Vec<String> {
    let matched = catalog::matching_slugs(query);
    if matched.is_empty() {
        return config
            .default_search_categories
            .iter()
            .take(config.max_search_categories)
            .cloned()
            .collect();
    }
    matched
        .into_iter()
        .take(config.max_search_categories)
        .map(str::to_string)
        .collect()
}

pub fn search(scraper: &Scraper, query: &str) -> Vec<Product> {
    let config = scraper.config();
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < config.min_query_len {
        return Vec::new();
    }

    // Keyed by the query exactly as given.
    let key = format!("search:{query}");
    if let Some(Cached::Products(products)) = scraper.cache().get(&key) {
        return products;
    }

    let slugs = candidate_slugs(&needle, config);
    debug!("search {query:?} over {slugs:?}");

    let mut collected = fetch_categories(scraper, &slugs);
    match scraper.scrape_homepage() {
        Ok(homepage) => collected.extend(homepage.products),
        Err(e) => warn!("search {query:?}: homepage skipped: {e}"),
    }

    let mut seen = HashSet::new();
    let products: Vec<Product> = collected
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect();

    scraper.cache().set(key, Cached::Products(products.clone()));
    products
}

/// First listing page of each slug, fetched in parallel. Results are
/// concatenated in `slugs` order; a failed category contributes nothing.
fn fetch_categories(scraper: &Scraper, slugs: &[String]) -> Vec<Product> {
    thread::scope(|s| {
        let handles: Vec<_> = slugs
            .iter()
            .map(|slug| {
                let handle = s.spawn(move || {
                    let Some(category) = scraper.find_category(slug) else {
                        return Ok(Vec::new());
                    };
                    scraper.scrape_products(&category, 1).map(|r| r.products)
                });
                (slug, handle)
            })
            .collect();

        let mut products = Vec::new();
        for (slug, handle) in handles {
            match handle.join() {
                Ok(Ok(found)) => products.extend(found),
                Ok(Err(e)) => warn!("search: category {slug} failed: {e}"),
                Err(_) => warn!("search: category {slug} worker panicked"),
            }
        }
        products
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_matched_categories() {
        let config = ScraperConfig::default();
        let slugs = candidate_slugs("oil", &config);
        assert_eq!(slugs, vec!["maintenance-cleaning", "motor", "plumbing"]);

        let mut narrow = ScraperConfig::default();
        narrow.max_search_categories = 1;
        assert_eq!(candidate_slugs("oil", &narrow), vec!["maintenance-cleaning"]);
    }

    #[test]
    fn unmatched_query_uses_defaults() {
        let config = ScraperConfig::default();
        assert_eq!(
            candidate_slugs("zzzz", &config),
            vec!["maintenance-cleaning", "safety", "anchoring-docking"]
        );
    }

    #[test]
    fn anchor_selects_anchoring() {
        let config = ScraperConfig::default();
        let slugs = candidate_slugs("anchor", &config);
        assert!(slugs.contains(&"anchoring-docking".to_string()));
        assert!(slugs.len() <= 3);
    }
}
