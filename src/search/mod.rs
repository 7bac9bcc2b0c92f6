pub mod providers;

/// Search provider abstraction - different providers can be plugged in
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a search, returning up to `count` ranked items
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchItem>, SearchError>;
}

/// A single raw item as returned by the search engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Snippet/description of the page content
    pub snippet: String,
}

/// Search-related errors
///
/// `RateLimited` is the only variant the fetch routine retries on; everything
/// else propagates to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("rate limit exceeded")]
    RateLimited,

    #[error("invalid API key")]
    InvalidApiKey,

    #[error("API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
