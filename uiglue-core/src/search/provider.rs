//! Lookup capability trait and implementations
//!
//! Provides:
//! - [`SearchProvider`], the async seam the controller calls
//! - [`search_fn`] to adapt an async closure
//! - [`MockSearch`] with scripted latency and outcomes for tests

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::item::ResultItem;
use crate::search::options::SearchContext;

/// Outcome of one lookup; `None` and an empty list both mean "no results"
pub type SearchOutcome = anyhow::Result<Option<Vec<ResultItem>>>;

/// Asynchronous lookup for a trimmed query
///
/// Must be safe to call while an earlier call is still in flight: the
/// controller never aborts a lookup, it ignores superseded outcomes.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, ctx: &SearchContext) -> SearchOutcome;
}

/// Provider backed by an async closure
pub struct FnSearch<F>(F);

#[async_trait]
impl<F, Fut> SearchProvider for FnSearch<F>
where
    F: Fn(String, SearchContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = SearchOutcome> + Send + 'static,
{
    async fn search(&self, query: &str, ctx: &SearchContext) -> SearchOutcome {
        (self.0)(query.to_string(), ctx.clone()).await
    }
}

/// Wrap an async closure as a provider
pub fn search_fn<F, Fut>(f: F) -> Arc<dyn SearchProvider>
where
    F: Fn(String, SearchContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = SearchOutcome> + Send + 'static,
{
    Arc::new(FnSearch(f))
}

struct Scripted {
    delay: Duration,
    outcome: Result<Vec<ResultItem>, String>,
}

/// Provider that replays scripted responses in call order
///
/// Each call pops the next script entry, sleeps for its delay, then
/// returns its outcome. An exhausted script answers `Ok(None)` at once.
#[derive(Default)]
pub struct MockSearch {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond_after(&self, delay: Duration, items: Vec<ResultItem>) -> &Self {
        self.push(Scripted {
            delay,
            outcome: Ok(items),
        })
    }

    /// Queue a failing response
    pub fn fail_after(&self, delay: Duration, message: impl Into<String>) -> &Self {
        self.push(Scripted {
            delay,
            outcome: Err(message.into()),
        })
    }

    /// Queries received so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, entry: Scripted) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(entry);
        self
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, _ctx: &SearchContext) -> SearchOutcome {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.to_string());

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        let Some(entry) = next else {
            return Ok(None);
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }

        match entry.outcome {
            Ok(items) => Ok(Some(items)),
            Err(message) => Err(anyhow::anyhow!(message)),
        }
    }
}
