//! CSS selectors for the storefront's PrestaShop templates.
//!
//! When the origin changes its markup, update the selector here and add a
//! fixture covering the new shape.

use scraper::Selector;
use std::sync::LazyLock;

fn parse(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Product cards on category and search listings.
pub mod card {
    use super::*;

    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        parse("article.product-miniature, .product-miniature, .js-product-miniature")
    });
    pub static LINK: LazyLock<Selector> =
        LazyLock::new(|| parse("a.thumbnail, .product-thumbnail a, a"));
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| parse(".product-title a, h3 a, h2 a, .product-name a"));
    pub static TITLED_LINK: LazyLock<Selector> = LazyLock::new(|| parse("a[title]"));
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        parse(".product-price-and-shipping .price, .price, [itemprop=\"price\"]")
    });
    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        parse(".regular-price, .product-price-and-shipping .regular-price")
    });
    pub static DISCOUNT: LazyLock<Selector> = LazyLock::new(|| {
        parse(".discount-percentage, .discount-amount, .product-flag.discount")
    });
    pub static STOCK: LazyLock<Selector> =
        LazyLock::new(|| parse(".product-availability, .availability"));

    /// Attribute carrying the shop's numeric product id.
    pub const ID_ATTR: &str = "data-id-product";
}

/// Featured cards on the homepage, a slightly different template.
pub mod featured {
    use super::*;

    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| parse("article.product-miniature, .product-miniature"));
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| parse("a"));
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| parse(".product-title a, h3 a, h5 a, h2 a"));
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| parse(".price"));
    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| parse(".regular-price"));
    pub static DISCOUNT: LazyLock<Selector> =
        LazyLock::new(|| parse(".discount-percentage, .discount-amount"));
    pub static STOCK: LazyLock<Selector> = LazyLock::new(|| parse(".product-availability"));
}

/// Anchor-first fallback used when no card matched.
pub mod anchor {
    use super::*;

    pub static PRODUCT_LINK: LazyLock<Selector> = LazyLock::new(|| parse("a[href*=\".html\"]"));
    pub static PRODUCT_ANCESTOR: LazyLock<Selector> = LazyLock::new(|| {
        parse(".product-miniature, .product-container, [class*=\"product\"]")
    });
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| parse(".price"));
    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| parse(".regular-price"));
    pub static DISCOUNT: LazyLock<Selector> =
        LazyLock::new(|| parse(".discount-percentage, .discount-amount"));
    pub static STOCK: LazyLock<Selector> =
        LazyLock::new(|| parse(".product-availability, .availability"));

    /// CMS pages share the `.html` suffix but are not products.
    pub const CMS_MARKER: &str = "content/";
}

pub static PAGINATION_LINK: LazyLock<Selector> =
    LazyLock::new(|| parse("nav.pagination .page-list a, .pagination a"));

pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| parse("img"));

/// Single product page.
pub mod detail {
    use super::*;

    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| parse("h1[itemprop=\"name\"], h1.product-detail-name, h1"));
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        parse("[itemprop=\"price\"], .current-price .price, .product-price")
    });
    pub static REGULAR_PRICE: LazyLock<Selector> = LazyLock::new(|| parse(".regular-price"));
    pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
        parse("[itemprop=\"description\"], .product-description, #description .product-description")
    });
    pub static COVER: LazyLock<Selector> = LazyLock::new(|| {
        parse("img.js-qv-product-cover, .product-cover img, .product-images img")
    });
    pub static STOCK: LazyLock<Selector> = LazyLock::new(|| parse(".product-availability"));
}
