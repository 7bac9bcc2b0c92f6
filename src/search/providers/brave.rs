use crate::search::{SearchError, SearchItem, SearchProvider};
use std::time::Duration;

/// Brave Search API provider
///
/// The API key comes from the BRAVE_API_KEY environment variable, falling
/// back to the value in the config file.
/// Free tier: 2000 requests/month
/// Documentation: https://brave.com/search/api/
pub struct BraveSearchProvider {
    client: reqwest::Client,
    api_key: String,
}

impl BraveSearchProvider {
    /// Create a new Brave Search provider
    pub fn new(config_api_key: &str) -> Self {
        let api_key = std::env::var("BRAVE_API_KEY").unwrap_or_else(|_| {
            if config_api_key.is_empty() {
                tracing::warn!("no Brave API key configured, searches will fail");
            }
            config_api_key.to_string()
        });

        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl SearchProvider for BraveSearchProvider {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchItem>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::InvalidApiKey);
        }

        let url = "https://api.search.brave.com/res/v1/web/search";

        tracing::debug!(query = %query, count, "performing brave search");

        let response = self
            .client
            .get(url)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", &count.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            tracing::warn!(
                status = %status,
                error = %error_text,
                "brave search api error"
            );

            return match status.as_u16() {
                401 | 403 => Err(SearchError::InvalidApiKey),
                429 => Err(SearchError::RateLimited),
                _ => Err(SearchError::Api(format!(
                    "HTTP {}: {}",
                    status, error_text
                ))),
            };
        }

        let json: serde_json::Value = response.json().await?;

        let mut items = Vec::new();
        if let Some(web_results) = json["web"]["results"].as_array() {
            for result in web_results {
                items.push(SearchItem {
                    title: result["title"].as_str().unwrap_or("").to_string(),
                    url: result["url"].as_str().unwrap_or("").to_string(),
                    snippet: result["description"].as_str().unwrap_or("").to_string(),
                });

                // Stop once we have enough results
                if items.len() >= count {
                    break;
                }
            }
        }

        tracing::debug!(
            query = %query,
            result_count = items.len(),
            "brave search completed"
        );

        Ok(items)
    }
}
