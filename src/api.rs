//! Response shapes handed to the storefront UI.
//!
//! Nothing here returns an error: failures become an empty body with an
//! `error` message and a non-200 status, so the UI can always render its
//! empty state.

use log::warn;
use serde::Serialize;

use crate::models::{Category, Product};
use crate::scraper::Scraper;

/// Freshness directive matching the internal cache TTL.
pub const CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<&'static str>,
    pub body: T,
}

impl<T> ApiResponse<T> {
    fn ok(body: T) -> Self {
        Self {
            status: 200,
            cache_control: Some(CACHE_CONTROL),
            body,
        }
    }

    /// A response edge caches must not keep.
    fn uncached(status: u16, body: T) -> Self {
        Self {
            status,
            cache_control: None,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesBody {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsBody {
    pub products: Vec<Product>,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductsBody {
    fn error(message: &str) -> Self {
        Self {
            products: Vec::new(),
            total_pages: 0,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchBody {
    pub products: Vec<Product>,
}

pub fn list_categories(scraper: &Scraper) -> ApiResponse<CategoriesBody> {
    ApiResponse::ok(CategoriesBody {
        categories: scraper.categories(),
    })
}

/// `slug: None` lists the homepage's featured products and ignores `page`.
pub fn list_products(
    scraper: &Scraper,
    slug: Option<&str>,
    page: u32,
) -> ApiResponse<ProductsBody> {
    let Some(slug) = slug else {
        return match scraper.scrape_homepage() {
            Ok(homepage) => ApiResponse::ok(ProductsBody {
                products: homepage.products,
                total_pages: 1,
                error: None,
            }),
            Err(e) => {
                warn!("featured products: {e}");
                ApiResponse::uncached(500, ProductsBody::error("Failed to fetch products"))
            }
        };
    };

    let Some(category) = scraper.find_category(slug) else {
        return ApiResponse::uncached(404, ProductsBody::error("Category not found"));
    };

    match scraper.scrape_products(&category, page.max(1)) {
        Ok(result) => ApiResponse::ok(ProductsBody {
            products: result.products,
            total_pages: result.total_pages,
            error: None,
        }),
        Err(e) => {
            warn!("products for {slug}: {e}");
            ApiResponse::uncached(500, ProductsBody::error("Failed to fetch products"))
        }
    }
}

/// Queries too short to search come back empty and without a cache directive.
pub fn search(scraper: &Scraper, query: &str) -> ApiResponse<SearchBody> {
    if query.trim().chars().count() < scraper.config().min_query_len {
        return ApiResponse::uncached(200, SearchBody { products: Vec::new() });
    }
    ApiResponse::ok(SearchBody {
        products: scraper.search(query),
    })
}
