use crate::search::{SearchError, SearchItem, SearchProvider};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;

/// Default number of attempts before a rate-limited query gives up.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// First backoff delay after a rate-limited attempt; doubles on each retry.
const INITIAL_BACKOFF_SECS: u64 = 5;

/// A search result as shown on the dashboard.
///
/// Every result of one fetch batch carries the same `retrieved_at` stamp,
/// taken when the batch arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedResult {
    pub title: String,
    pub url: String,
    pub description: String,
    pub retrieved_at: DateTime<Local>,
}

/// Retry-with-backoff wrapper around a search provider.
///
/// Rate-limited attempts back off exponentially (5s, 10s, 20s, ...) up to
/// `max_retries` attempts; exhausting the retries degrades to whatever was
/// accumulated (possibly nothing) instead of failing. Any other provider
/// error propagates immediately.
pub struct Fetcher {
    provider: Arc<dyn SearchProvider>,
    max_retries: u32,
}

impl Fetcher {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Fetch up to `count` results for `query`.
    ///
    /// The query string is passed to the provider unvalidated; an empty or
    /// nonsense query yielding zero results is success, not an error. The
    /// backoff sleeps block the calling task, so a rate-limited query delays
    /// whatever is fetched after it on the same task.
    pub async fn fetch(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<RetrievedResult>, SearchError> {
        let mut items: Vec<SearchItem> = Vec::new();
        let mut retry_count: u32 = 0;
        let mut backoff = Duration::from_secs(INITIAL_BACKOFF_SECS);

        while retry_count < self.max_retries {
            match self.provider.search(query, count).await {
                Ok(batch) => {
                    items = batch;
                    break;
                }
                Err(SearchError::RateLimited) => {
                    retry_count += 1;
                    tracing::debug!(
                        query = %query,
                        retry = retry_count,
                        backoff_secs = backoff.as_secs(),
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }

        if retry_count >= self.max_retries {
            tracing::warn!(
                query = %query,
                attempts = retry_count,
                "retries exhausted, returning best-effort results"
            );
        }

        items.truncate(count);

        let retrieved_at = Local::now();
        Ok(items
            .into_iter()
            .map(|item| RetrievedResult {
                title: item.title,
                url: item.url,
                description: item.snippet,
                retrieved_at,
            })
            .collect())
    }
}
