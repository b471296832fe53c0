use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};

use crate::config::ScraperConfig;
use crate::error::FetchError;

/// Source of raw HTML for a URL.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher that presents itself as a mobile browser.
///
/// No retries and no explicit timeout; redirects follow the reqwest default.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        for (name, value) in [
            (ACCEPT, &config.accept),
            (ACCEPT_LANGUAGE, &config.accept_language),
            (USER_AGENT, &config.user_agent),
        ] {
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.insert(name, v);
                }
                Err(_) => warn!("skipping invalid {name} header value {value:?}"),
            }
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("GET {url}");
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            warn!("{url} answered {status}");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(transport)
    }
}
