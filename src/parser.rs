//! Listing and product-page extraction.
//!
//! A listing page is read by two independent strategies. [`CardStrategy`]
//! walks product cards top-down; [`AnchorStrategy`] starts from product links
//! and climbs to their enclosing product block. The anchor pass only runs
//! when cards produced nothing.

use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::fields::{
    attr_trimmed, first_text, parse_discount, parse_price, product_id, resolve_image, text_of,
};
use crate::models::{DEFAULT_STOCK, ListingResult, Product};
use crate::selectors;

/// One way of finding products on a parsed page.
pub trait ListingStrategy {
    fn name(&self) -> &'static str;

    /// Appends accepted products whose id is not yet in `seen`.
    fn collect(&self, doc: &Html, origin: &str, seen: &mut HashSet<String>) -> Vec<Product>;
}

/// Selector set for one card template.
pub struct CardSelectors {
    pub container: &'static Selector,
    pub link: &'static Selector,
    pub title: &'static Selector,
    pub titled_link: Option<&'static Selector>,
    pub price: &'static Selector,
    pub regular_price: &'static Selector,
    pub discount: &'static Selector,
    pub stock: &'static Selector,
}

impl CardSelectors {
    pub fn listing() -> Self {
        use selectors::card::*;
        Self {
            container: &CONTAINER,
            link: &LINK,
            title: &TITLE,
            titled_link: Some(&*TITLED_LINK),
            price: &PRICE,
            regular_price: &REGULAR_PRICE,
            discount: &DISCOUNT,
            stock: &STOCK,
        }
    }

    pub fn featured() -> Self {
        use selectors::featured::*;
        Self {
            container: &CONTAINER,
            link: &LINK,
            title: &TITLE,
            titled_link: None,
            price: &PRICE,
            regular_price: &REGULAR_PRICE,
            discount: &DISCOUNT,
            stock: &STOCK,
        }
    }
}

pub struct CardStrategy {
    selectors: CardSelectors,
}

impl CardStrategy {
    pub fn new(selectors: CardSelectors) -> Self {
        Self { selectors }
    }

    fn card_name<'a>(&self, card: ElementRef<'a>, link: Option<ElementRef<'a>>) -> String {
        let sel = &self.selectors;
        let title = first_text(card, sel.title);
        if !title.is_empty() {
            return title;
        }
        sel.titled_link
            .and_then(|s| card.select(s).next())
            .and_then(|a| attr_trimmed(a, "title"))
            .or_else(|| link.and_then(|a| attr_trimmed(a, "title")))
            .unwrap_or_default()
            .to_string()
    }
}

impl ListingStrategy for CardStrategy {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn collect(&self, doc: &Html, origin: &str, seen: &mut HashSet<String>) -> Vec<Product> {
        let sel = &self.selectors;
        let mut products = Vec::new();

        for card in doc.select(sel.container) {
            let link = card.select(sel.link).next();
            let url = link
                .and_then(|a| a.value().attr("href"))
                .unwrap_or("")
                .to_string();
            let name = self.card_name(card, link);

            let fields = PriceFields::read(card, sel.price, sel.regular_price, sel.discount);
            if name.is_empty() || fields.price <= 0.0 {
                continue;
            }

            let id = attr_trimmed(card, selectors::card::ID_ATTR)
                .map(str::to_string)
                .unwrap_or_else(|| product_id(&url, &name));
            if !seen.insert(id.clone()) {
                continue;
            }

            products.push(Product {
                id,
                name,
                price: fields.price,
                original_price: fields.original_price,
                discount: fields.discount,
                image: resolve_image(card, origin),
                url,
                stock: stock_text(card, sel.stock),
                category: None,
                description: None,
            });
        }
        products
    }
}

/// Anchor-first scan for when the card markup drifted.
pub struct AnchorStrategy;

impl AnchorStrategy {
    const MIN_NAME_LEN: usize = 3;
}

impl ListingStrategy for AnchorStrategy {
    fn name(&self) -> &'static str {
        "anchors"
    }

    fn collect(&self, doc: &Html, origin: &str, seen: &mut HashSet<String>) -> Vec<Product> {
        use selectors::anchor::*;
        let mut products = Vec::new();

        for anchor in doc.select(&PRODUCT_LINK) {
            let href = anchor.value().attr("href").unwrap_or("");
            if !href.contains(".html") || href.contains(CMS_MARKER) {
                continue;
            }

            let Some(block) = anchor
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| PRODUCT_ANCESTOR.matches(el))
            else {
                continue;
            };

            let name = attr_trimmed(anchor, "title")
                .map(str::to_string)
                .unwrap_or_else(|| text_of(anchor));
            if name.chars().count() < Self::MIN_NAME_LEN {
                continue;
            }

            let fields = PriceFields::read(block, &PRICE, &REGULAR_PRICE, &DISCOUNT);
            if fields.price <= 0.0 {
                continue;
            }

            let id = product_id(href, &name);
            if !seen.insert(id.clone()) {
                continue;
            }

            products.push(Product {
                id,
                name,
                price: fields.price,
                original_price: fields.original_price,
                discount: fields.discount,
                image: resolve_image(block, origin),
                url: href.to_string(),
                stock: stock_text(block, &STOCK),
                category: None,
                description: None,
            });
        }
        products
    }
}

struct PriceFields {
    price: f64,
    original_price: Option<f64>,
    discount: Option<u32>,
}

impl PriceFields {
    fn read(
        el: ElementRef<'_>,
        price: &Selector,
        regular_price: &Selector,
        discount: &Selector,
    ) -> Self {
        let price = parse_price(&first_text(el, price));
        Self {
            price,
            original_price: original_price(price, &first_text(el, regular_price)),
            discount: parse_discount(&first_text(el, discount)),
        }
    }
}

/// Strikethrough price, kept only when it parses and differs from `price`.
fn original_price(price: f64, text: &str) -> Option<f64> {
    let original = parse_price(text);
    (original > 0.0 && original != price).then_some(original)
}

fn stock_text(el: ElementRef<'_>, selector: &Selector) -> String {
    let stock = first_text(el, selector);
    if stock.is_empty() {
        DEFAULT_STOCK.to_string()
    } else {
        stock
    }
}

/// Runs a primary strategy and, only if it found nothing, a fallback.
pub struct ListingExtractor {
    primary: Box<dyn ListingStrategy + Send + Sync>,
    fallback: Option<Box<dyn ListingStrategy + Send + Sync>>,
}

impl ListingExtractor {
    /// Category and search listings: cards, then anchors.
    pub fn listing() -> Self {
        Self {
            primary: Box::new(CardStrategy::new(CardSelectors::listing())),
            fallback: Some(Box::new(AnchorStrategy)),
        }
    }

    /// Homepage featured products: cards only.
    pub fn featured() -> Self {
        Self {
            primary: Box::new(CardStrategy::new(CardSelectors::featured())),
            fallback: None,
        }
    }

    pub fn extract(&self, html: &str, origin: &str) -> ListingResult {
        let doc = Html::parse_document(html);
        let mut seen = HashSet::new();

        let mut strategy = self.primary.name();
        let mut products = self.primary.collect(&doc, origin, &mut seen);
        if products.is_empty() {
            if let Some(fallback) = &self.fallback {
                strategy = fallback.name();
                products.extend(fallback.collect(&doc, origin, &mut seen));
            }
        }

        let total_pages = total_pages(&doc);
        debug!(
            "extracted {} products via {strategy}, {total_pages} pages",
            products.len()
        );
        ListingResult {
            products,
            total_pages,
        }
    }
}

/// Highest numbered pagination link, 1 when there is none.
pub fn total_pages(doc: &Html) -> u32 {
    doc.select(&selectors::PAGINATION_LINK)
        .filter_map(|a| text_of(a).parse::<u32>().ok())
        .fold(1, u32::max)
}

/// Category or search listing page.
pub fn extract_listing(html: &str, origin: &str) -> ListingResult {
    ListingExtractor::listing().extract(html, origin)
}

/// Featured products on the homepage.
pub fn extract_featured(html: &str, origin: &str) -> Vec<Product> {
    ListingExtractor::featured().extract(html, origin).products
}

/// Single product page. `None` when the page has no product heading.
pub fn parse_product_detail(html: &str, url: &str, origin: &str) -> Option<Product> {
    use selectors::detail::*;
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let name = first_text(root, &NAME);
    if name.is_empty() {
        return None;
    }

    let price = parse_price(&first_text(root, &PRICE));
    let description = first_text(root, &DESCRIPTION);
    let image = root
        .select(&COVER)
        .next()
        .and_then(|img| attr_trimmed(img, "src").or_else(|| attr_trimmed(img, "data-src")))
        .filter(|src| !src.contains("data:image"))
        .map(|src| crate::fields::absolutize(src, origin))
        .unwrap_or_default();

    Some(Product {
        id: product_id(url, &name),
        original_price: original_price(price, &first_text(root, &REGULAR_PRICE)),
        discount: None,
        price,
        image,
        url: url.to_string(),
        stock: stock_text(root, &STOCK),
        category: None,
        description: (!description.is_empty()).then_some(description),
        name,
    })
}
