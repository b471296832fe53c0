//! Single-value extractors. None of these fail: absence comes back as `0.0`,
//! `None` or an empty string and the listing filter decides what to keep.

use regex::Regex;
use scraper::ElementRef;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

use crate::selectors;

static DISCOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?(\d+)%").expect("valid discount regex"));
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/(\d+)-").expect("valid id regex"));

/// Lazy-load attributes, most reliable first. `src` often holds a placeholder.
const IMAGE_ATTRS: [&str; 4] = [
    "data-original",
    "data-src",
    "data-full-size-image-url",
    "data-lazy-src",
];

pub const SYNTHETIC_ID_LEN: usize = 10;

/// Parses a displayed price such as `"€99.00"` or `"1.234,56 €"`.
pub fn parse_price(text: &str) -> f64 {
    let mut cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    // Last comma is the decimal mark, any earlier ones group thousands.
    if let Some(pos) = cleaned.rfind(',') {
        cleaned.replace_range(pos..=pos, ".");
        cleaned.retain(|c| c != ',');
    }

    let normalized = match cleaned.rsplit_once('.') {
        Some((int_part, decimals)) if int_part.contains('.') => {
            format!("{}.{}", int_part.replace('.', ""), decimals)
        }
        _ => cleaned,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .unwrap_or(0.0)
}

/// Pulls `15` out of labels like `"-15%"` or `"15% OFF"`.
pub fn parse_discount(text: &str) -> Option<u32> {
    DISCOUNT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Best image URL of the first `<img>` under `el`, made absolute against `origin`.
pub fn resolve_image(el: ElementRef<'_>, origin: &str) -> String {
    let Some(img) = el.select(&selectors::IMAGE).next() else {
        return String::new();
    };
    let attrs = img.value();

    let lazy = IMAGE_ATTRS
        .iter()
        .filter_map(|name| attrs.attr(name))
        .find(|v| !v.is_empty());
    let src = match lazy {
        Some(v) => v,
        None => attrs
            .attr("src")
            .filter(|v| !v.contains("data:image"))
            .unwrap_or(""),
    };

    absolutize(src, origin)
}

pub fn absolutize(src: &str, origin: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{}{src}", origin.trim_end_matches('/'))
    } else {
        src.to_string()
    }
}

/// Numeric id from the shop's `/<digits>-slug` URL convention.
pub fn extract_id(url: &str) -> Option<String> {
    ID_RE.captures(url).map(|caps| caps[1].to_string())
}

/// Id for a product: the URL's numeric id, or a stable token derived from
/// name and url when the URL has none.
pub fn product_id(url: &str, name: &str) -> String {
    extract_id(url).unwrap_or_else(|| synthetic_id(name, url))
}

pub fn synthetic_id(name: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update([0u8]);
    hasher.update(url.as_bytes());
    let mut id = hex::encode(hasher.finalize());
    id.truncate(SYNTHETIC_ID_LEN);
    id
}

/// Whitespace-normalized text content of `el`.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first match of `selector` under `el`, empty when none.
pub fn first_text(el: ElementRef<'_>, selector: &scraper::Selector) -> String {
    el.select(selector).next().map(text_of).unwrap_or_default()
}

/// Trimmed attribute value, `None` when missing or blank.
pub fn attr_trimmed<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}
