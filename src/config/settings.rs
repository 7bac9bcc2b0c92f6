use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Allowed refresh interval, in seconds.
pub const INTERVAL_RANGE: RangeInclusive<u64> = 1..=300;

/// Allowed number of results displayed per query.
pub const RESULTS_RANGE: RangeInclusive<usize> = 1..=10;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Queries seeded into the dashboard at startup
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    /// Seconds between fetch cycles
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Results requested per query each cycle
    #[serde(default = "default_results_per_query")]
    pub results_per_query: usize,

    /// Brave Search API key; the BRAVE_API_KEY env var takes precedence
    #[serde(default)]
    pub brave_api_key: String,

    /// Enable file-based debug logging
    #[serde(default)]
    pub debug: bool,

    /// Override for the debug log file location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            refresh_interval_secs: default_refresh_interval(),
            results_per_query: default_results_per_query(),
            brave_api_key: String::new(),
            debug: false,
            debug_log_path: None,
        }
    }
}

impl Config {
    /// Force the tunable values back into their allowed ranges.
    ///
    /// Applied after loading so a hand-edited file cannot push the refresh
    /// loop or the provider outside what the dashboard supports.
    pub fn clamp(&mut self) {
        self.refresh_interval_secs = self
            .refresh_interval_secs
            .clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end());
        self.results_per_query = self
            .results_per_query
            .clamp(*RESULTS_RANGE.start(), *RESULTS_RANGE.end());
    }
}

fn default_queries() -> Vec<String> {
    vec!["Hurricane".to_string(), "Winter snowstorm".to_string()]
}

fn default_refresh_interval() -> u64 {
    10
}

fn default_results_per_query() -> usize {
    5
}
