use crate::config::{Config, INTERVAL_RANGE, RESULTS_RANGE};
use crate::fetch::{Fetcher, RetrievedResult};

/// Text given to a freshly added query until the user edits it.
pub const PLACEHOLDER_QUERY: &str = "New Query";

/// A bookmarked search result, copied out of a result at the moment of the
/// save action. Lives for the session; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArticle {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl From<&RetrievedResult> for SavedArticle {
    fn from(result: &RetrievedResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
            description: result.description.clone(),
        }
    }
}

/// Display state for one query's result area.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// No fetch cycle has touched this query yet
    Pending,
    /// Results of the most recent (possibly best-effort) fetch
    Loaded(Vec<RetrievedResult>),
    /// The most recent fetch failed; retried next cycle
    Failed(String),
}

/// User actions applied to the dashboard through a single dispatcher.
#[derive(Debug, Clone)]
pub enum Action {
    AddQuery,
    RemoveQuery(usize),
    SetQueryText(usize, String),
    SaveArticle(RetrievedResult),
    SetRefreshInterval(u64),
    SetResultsPerQuery(usize),
}

/// Owns the query list, per-query result slots, saved articles, and the two
/// refresh settings. All mutation goes through [`Dashboard::apply`] or
/// [`Dashboard::refresh_all`]; rendering only reads.
///
/// Invariant: the query list never becomes empty, and `slots` stays
/// index-aligned with `queries`.
pub struct Dashboard {
    queries: Vec<String>,
    slots: Vec<Slot>,
    saved: Vec<SavedArticle>,
    refresh_interval_secs: u64,
    results_per_query: usize,
}

impl Dashboard {
    pub fn new(config: &Config) -> Self {
        let mut queries = config.queries.clone();
        if queries.is_empty() {
            queries.push(PLACEHOLDER_QUERY.to_string());
        }
        let slots = vec![Slot::Pending; queries.len()];

        Self {
            queries,
            slots,
            saved: Vec::new(),
            refresh_interval_secs: clamp_interval(config.refresh_interval_secs),
            results_per_query: clamp_results(config.results_per_query),
        }
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn saved(&self) -> &[SavedArticle] {
        &self.saved
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.refresh_interval_secs
    }

    pub fn results_per_query(&self) -> usize {
        self.results_per_query
    }

    /// Apply one user action.
    ///
    /// Invariant guards (removing the last query, out-of-range indices) are
    /// silent no-ops, not errors.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::AddQuery => {
                self.queries.push(PLACEHOLDER_QUERY.to_string());
                self.slots.push(Slot::Pending);
            }
            Action::RemoveQuery(index) => {
                if self.queries.len() > 1 && index < self.queries.len() {
                    self.queries.remove(index);
                    self.slots.remove(index);
                }
            }
            Action::SetQueryText(index, text) => {
                // Empty text is allowed; the provider decides what it means.
                if let Some(query) = self.queries.get_mut(index) {
                    *query = text;
                }
            }
            Action::SaveArticle(result) => {
                self.saved.push(SavedArticle::from(&result));
            }
            Action::SetRefreshInterval(secs) => {
                self.refresh_interval_secs = clamp_interval(secs);
            }
            Action::SetResultsPerQuery(n) => {
                self.results_per_query = clamp_results(n);
            }
        }
    }

    /// Run one fetch cycle: every query in list order, each one independent.
    ///
    /// A failing query marks its own slot and the cycle moves on; it never
    /// aborts the remaining queries. Fetches run sequentially on the calling
    /// task, so a rate-limited query delays the queries listed after it.
    pub async fn refresh_all(&mut self, fetcher: &Fetcher) {
        for i in 0..self.queries.len() {
            let query = self.queries[i].clone();
            match fetcher.fetch(&query, self.results_per_query).await {
                Ok(results) => {
                    tracing::debug!(query = %query, count = results.len(), "slot refreshed");
                    self.slots[i] = Slot::Loaded(results);
                }
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "query refresh failed");
                    self.slots[i] = Slot::Failed(e.to_string());
                }
            }
        }
    }
}

fn clamp_interval(secs: u64) -> u64 {
    secs.clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end())
}

fn clamp_results(n: usize) -> usize {
    n.clamp(*RESULTS_RANGE.start(), *RESULTS_RANGE.end())
}
