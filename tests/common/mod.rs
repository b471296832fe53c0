#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chandlery_scraper::{Fetch, FetchError, ManualClock, Scraper, ScraperConfig};

pub const BASE: &str = "https://nautichandler.com/en";

/// Scripted fetcher: known URLs answer with their page or status, anything
/// else is a 404. Records every call.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, Result<String, u16>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn scraper(fetcher: &Arc<MockFetcher>) -> (Scraper, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let scraper = Scraper::with_parts(ScraperConfig::default(), fetcher.clone(), clock.clone());
    (scraper, clock)
}

pub fn category_url(path: &str) -> String {
    format!("{BASE}/{path}")
}

/// A PrestaShop product card.
pub fn card(id: u32, name: &str, price: &str) -> String {
    format!(
        r#"<article class="product-miniature js-product-miniature" data-id-product="{id}">
             <a class="thumbnail product-thumbnail" href="{BASE}/c/{id}-item.html">
               <img src="data:image/svg+xml;base64,AA" data-original="/img/p/{id}.jpg">
             </a>
             <h3 class="product-title"><a href="{BASE}/c/{id}-item.html">{name}</a></h3>
             <div class="product-price-and-shipping"><span class="price">{price}</span></div>
           </article>"#
    )
}

pub fn listing(cards: &[String], pages: u32) -> String {
    let pagination: String = (1..=pages)
        .map(|n| format!(r#"<li><a href="?page={n}">{n}</a></li>"#))
        .collect();
    format!(
        r#"<html><body><div id="js-product-list">{}</div>
           <nav class="pagination"><ul class="page-list">{pagination}</ul></nav></body></html>"#,
        cards.concat()
    )
}
