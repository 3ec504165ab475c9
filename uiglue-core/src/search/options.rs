use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::config::SearchConfig;
use crate::element::ElementRef;
use crate::events::SearchEvent;
use crate::item::ResultItem;
use crate::search::provider::{search_fn, SearchOutcome, SearchProvider};

pub type ResultsCallback = Arc<dyn Fn(&[ResultItem], &SearchContext) + Send + Sync>;
pub type ErrorCallback = Arc<dyn Fn(&anyhow::Error, &SearchContext) + Send + Sync>;
pub type SelectCallback = Arc<dyn Fn(&ResultItem, &SearchContext) + Send + Sync>;

/// Read-only view of a bound controller, handed to the provider and callbacks
///
/// For caller-side correlation only; the controller never reads it back.
#[derive(Clone)]
pub struct SearchContext {
    pub root: ElementRef,
    pub input: ElementRef,
    pub status: ElementRef,
    pub results: ElementRef,
    pub delay: Duration,
    pub min_length: usize,
    /// Disabled flag in effect when the controller was bound
    pub disabled: bool,
}

impl fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("delay", &self.delay)
            .field("min_length", &self.min_length)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// Settings plus capabilities for a search controller
#[derive(Clone, Default)]
pub struct SearchOptions {
    pub config: SearchConfig,
    pub(crate) search: Option<Arc<dyn SearchProvider>>,
    pub(crate) on_results: Option<ResultsCallback>,
    pub(crate) on_error: Option<ErrorCallback>,
    pub(crate) on_select: Option<SelectCallback>,
    pub(crate) events: Option<UnboundedSender<SearchEvent>>,
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("config", &self.config)
            .field("search", &self.search.is_some())
            .field("on_results", &self.on_results.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl SearchOptions {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = Some(disabled);
        self
    }

    pub fn search(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    pub fn search_fn<F, Fut>(self, f: F) -> Self
    where
        F: Fn(String, SearchContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SearchOutcome> + Send + 'static,
    {
        self.search(search_fn(f))
    }

    pub fn on_results(
        mut self,
        f: impl Fn(&[ResultItem], &SearchContext) + Send + Sync + 'static,
    ) -> Self {
        self.on_results = Some(Arc::new(f));
        self
    }

    pub fn on_error(
        mut self,
        f: impl Fn(&anyhow::Error, &SearchContext) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    pub fn on_select(
        mut self,
        f: impl Fn(&ResultItem, &SearchContext) + Send + Sync + 'static,
    ) -> Self {
        self.on_select = Some(Arc::new(f));
        self
    }

    /// Stream [`SearchEvent`]s to `tx`; a closed receiver is ignored
    pub fn events(mut self, tx: UnboundedSender<SearchEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }
}
