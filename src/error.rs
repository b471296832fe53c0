use thiserror::Error;

/// Errors raised while fetching a page from the origin.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch {url}: {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// HTTP status of the failed response, if the origin answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. } | FetchError::Transport { url, .. } => url,
        }
    }
}
