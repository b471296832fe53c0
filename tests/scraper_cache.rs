mod common;

use std::sync::Arc;
use std::time::Duration;

use chandlery_scraper::FetchError;
use common::{BASE, MockFetcher, card, category_url, listing, scraper};

#[test]
fn repeated_listing_fetches_once() {
    let url = category_url("100395-ropes");
    let fetcher = Arc::new(
        MockFetcher::new().page(&url, listing(&[card(1, "Dyneema rope", "€12,50")], 1)),
    );
    let (scraper, _) = scraper(&fetcher);
    let ropes = scraper.find_category("ropes").unwrap();

    let first = scraper.scrape_products(&ropes, 1).unwrap();
    let second = scraper.scrape_products(&ropes, 1).unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.call_count(), 1);
    assert_eq!(first.products[0].category.as_deref(), Some("ropes"));
}

#[test]
fn expired_listing_is_refetched() {
    let url = category_url("100395-ropes");
    let fetcher = Arc::new(
        MockFetcher::new().page(&url, listing(&[card(1, "Dyneema rope", "€12,50")], 1)),
    );
    let (scraper, clock) = scraper(&fetcher);
    let ropes = scraper.find_category("ropes").unwrap();

    scraper.scrape_products(&ropes, 1).unwrap();
    clock.advance(Duration::from_secs(4 * 60));
    scraper.scrape_products(&ropes, 1).unwrap();
    assert_eq!(fetcher.call_count(), 1);

    clock.advance(Duration::from_secs(60));
    scraper.scrape_products(&ropes, 1).unwrap();
    assert_eq!(fetcher.call_count(), 2);
}

#[test]
fn later_pages_use_query_string() {
    let base = category_url("100395-ropes");
    let page2 = format!("{base}?page=2");
    let fetcher = Arc::new(
        MockFetcher::new().page(&page2, listing(&[card(2, "Mooring line", "€30")], 4)),
    );
    let (scraper, _) = scraper(&fetcher);
    let ropes = scraper.find_category("ropes").unwrap();

    let result = scraper.scrape_products(&ropes, 2).unwrap();
    assert_eq!(result.total_pages, 4);
    assert_eq!(fetcher.calls(), vec![page2]);
}

#[test]
fn html_cache_is_shared_between_operations() {
    let url = "https://nautichandler.com/en/c/5-winch.html";
    let html = r#"<html><body><h1 itemprop="name">Winch</h1><span itemprop="price">€499,00</span></body></html>"#;
    let fetcher = Arc::new(MockFetcher::new().page(url, html));
    let (scraper, _) = scraper(&fetcher);

    scraper.fetch_page(url).unwrap();
    let product = scraper.scrape_product_detail(url).unwrap().unwrap();
    scraper.scrape_product_detail(url).unwrap();

    assert_eq!(product.id, "5");
    assert_eq!(product.price, 499.0);
    assert_eq!(fetcher.call_count(), 1);
}

#[test]
fn detail_without_product_is_none() {
    let url = "https://nautichandler.com/en/c/6-gone.html";
    let fetcher = Arc::new(MockFetcher::new().page(url, "<html><body><p>Gone</p></body></html>"));
    let (scraper, _) = scraper(&fetcher);
    assert!(scraper.scrape_product_detail(url).unwrap().is_none());
}

#[test]
fn fetch_errors_propagate_and_are_not_cached() {
    let url = category_url("100389-safety");
    let fetcher = Arc::new(MockFetcher::new().failing(&url, 503));
    let (scraper, _) = scraper(&fetcher);
    let safety = scraper.find_category("safety").unwrap();

    let err = scraper.scrape_products(&safety, 1).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503, .. }));
    assert_eq!(err.status(), Some(503));

    scraper.scrape_products(&safety, 1).unwrap_err();
    assert_eq!(fetcher.call_count(), 2);
}

#[test]
fn homepage_lists_featured_and_catalog() {
    let fetcher = Arc::new(MockFetcher::new().page(
        BASE,
        listing(&[card(10, "Teak cleaner", "€19,90"), card(11, "Free sticker", "€0,00")], 1),
    ));
    let (scraper, _) = scraper(&fetcher);

    let homepage = scraper.scrape_homepage().unwrap();
    assert_eq!(homepage.products.len(), 1);
    assert_eq!(homepage.products[0].name, "Teak cleaner");
    assert_eq!(homepage.products[0].image, "https://nautichandler.com/img/p/10.jpg");
    assert_eq!(homepage.categories.len(), 16);

    scraper.scrape_homepage().unwrap();
    assert_eq!(fetcher.call_count(), 1);
}
