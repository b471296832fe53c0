//! Scraper configuration: origin location, browser identity, cache TTL and
//! search fan-out.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Storefront root, also the homepage URL
    pub base_url: String,
    /// Scheme and host used to absolutize relative image URLs
    pub origin: String,
    /// Lifetime of every cache entry (seconds)
    pub cache_ttl_secs: u64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Upper bound on categories fetched for one search
    pub max_search_categories: usize,
    /// Shorter (trimmed) queries return nothing
    pub min_query_len: usize,
    /// Used when no keyword matches the query
    pub default_search_categories: Vec<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nautichandler.com/en".to_string(),
            origin: "https://nautichandler.com".to_string(),
            cache_ttl_secs: 5 * 60,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: "text/html,application/xhtml+xml".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            max_search_categories: 3,
            min_query_len: 2,
            default_search_categories: vec![
                "maintenance-cleaning".to_string(),
                "safety".to_string(),
                "anchoring-docking".to_string(),
            ],
        }
    }
}

impl ScraperConfig {
    /// Defaults with `CHANDLERY_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read a JSON config file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("CHANDLERY_BASE_URL") {
            self.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = var("CHANDLERY_ORIGIN") {
            self.origin = v.trim_end_matches('/').to_string();
        }
        if let Some(ttl) = var("CHANDLERY_CACHE_TTL_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
        {
            self.cache_ttl_secs = ttl;
        }
        if let Some(v) = var("CHANDLERY_USER_AGENT") {
            self.user_agent = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_origin() {
        let config = ScraperConfig::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.max_search_categories, 3);
        assert_eq!(config.default_search_categories.len(), 3);
    }

    #[test]
    fn env_overrides() {
        let mut config = ScraperConfig::default();
        config.apply_env(env(&[
            ("CHANDLERY_BASE_URL", "http://localhost:8080/en/"),
            ("CHANDLERY_CACHE_TTL_SECS", "60"),
        ]));
        assert_eq!(config.base_url, "http://localhost:8080/en");
        assert_eq!(config.cache_ttl_secs, 60);
    }

    #[test]
    fn bad_ttl_keeps_default() {
        let mut config = ScraperConfig::default();
        config.apply_env(env(&[("CHANDLERY_CACHE_TTL_SECS", "0")]));
        assert_eq!(config.cache_ttl_secs, 300);
        config.apply_env(env(&[("CHANDLERY_CACHE_TTL_SECS", "soon")]));
        assert_eq!(config.cache_ttl_secs, 300);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: ScraperConfig = serde_json::from_str(r#"{"cache_ttl_secs": 10}"#).unwrap();
        assert_eq!(config.cache_ttl_secs, 10);
        assert_eq!(config.min_query_len, 2);
    }
}
