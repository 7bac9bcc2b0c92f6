//! Common test utilities: a scripted search provider for driving the fetch
//! routine and the dashboard without touching the network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use stormwatch::search::{SearchError, SearchItem, SearchProvider};

/// One scripted provider response, consumed in order per call.
pub enum Scripted {
    Ok(Vec<SearchItem>),
    RateLimited,
    Api(String),
}

/// Search provider that replays a fixed script of responses.
///
/// Once the script runs dry, every further call succeeds with zero results.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `search` was invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchProvider for ScriptedProvider {
    async fn search(&self, _query: &str, _count: usize) -> Result<Vec<SearchItem>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().expect("script lock poisoned").pop_front();
        match next {
            Some(Scripted::Ok(items)) => Ok(items),
            Some(Scripted::RateLimited) => Err(SearchError::RateLimited),
            Some(Scripted::Api(message)) => Err(SearchError::Api(message)),
            None => Ok(Vec::new()),
        }
    }
}

/// Build `n` distinct search items
pub fn items(n: usize) -> Vec<SearchItem> {
    (0..n)
        .map(|i| SearchItem {
            title: format!("Result {i}"),
            url: format!("https://example.com/{i}"),
            snippet: format!("Snippet for result {i}"),
        })
        .collect()
}
