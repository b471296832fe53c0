use serde::{Deserialize, Serialize};

/// Stock text used when a card carries no availability label.
pub const DEFAULT_STOCK: &str = "In Stock";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    pub image: String,
    pub url: String,
    pub stock: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Discount to display: the scraped label if present, otherwise derived
    /// from the two prices when the original is higher.
    pub fn effective_discount(&self) -> Option<u32> {
        if self.discount.is_some() {
            return self.discount;
        }
        match self.original_price {
            Some(original) if original > self.price && original > 0.0 => {
                Some(((1.0 - self.price / original) * 100.0).round() as u32)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub icon: String,
}

/// One parsed listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    pub products: Vec<Product>,
    pub total_pages: u32,
}

impl Default for ListingResult {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homepage {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}
