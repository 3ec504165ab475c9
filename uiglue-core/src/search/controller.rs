//! Debounced, race-safe search controller
//!
//! Input events arm a single debounce timer; when it fires the controller
//! issues a lookup tagged with a fresh sequence number and shows the loading
//! state. Lookups may overlap, but only the outcome of the current request
//! reaches the display. Everything that can go wrong ends in a callback, a
//! log line or a silent no-op; no entry point panics or returns an error.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};

use crate::element::ElementRef;
use crate::error::WidgetError;
use crate::events::SearchEvent;
use crate::item::ResultItem;
use crate::search::debounce::Debouncer;
use crate::search::options::{SearchContext, SearchOptions};
use crate::search::provider::SearchOutcome;
use crate::search::sequence::{RequestId, SequenceGuard};
use crate::search::state::{
    ControllerState, DisplayState, Projector, EMPTY_STATUS, FAILURE_STATUS, LOADING_STATUS,
};

const WIDGET: &str = "DebouncedInput";

/// Handle to a search controller bound to one root element
///
/// Cheap to clone; all clones drive the same controller.
#[derive(Clone)]
pub struct SearchController {
    shared: Arc<Shared>,
}

struct Shared {
    ctx: SearchContext,
    options: SearchOptions,
    runtime: Handle,
    inner: Mutex<Inner>,
}

struct Inner {
    phase: ControllerState,
    disabled: bool,
    debounce: Debouncer,
    sequence: SequenceGuard,
    cache: Vec<ResultItem>,
    display: DisplayState,
}

enum Accepted {
    Results(Vec<ResultItem>),
    Failure(anyhow::Error),
}

impl SearchController {
    /// Attach a controller to `root`, which must contain `.input`,
    /// `.status` and `.results` elements
    ///
    /// Returns `None` after logging a diagnostic when an element is missing
    /// or no tokio runtime is running; the markup is left untouched then.
    pub fn bind(root: ElementRef, options: SearchOptions) -> Option<Self> {
        let input = root.find("input");
        let status = root.find("status");
        let results = root.find("results");

        let (input, status, results) = match (input, status, results) {
            (Some(input), Some(status), Some(results)) => (input, status, results),
            (input, status, _) => {
                let missing = if input.is_none() {
                    "input"
                } else if status.is_none() {
                    "status"
                } else {
                    "results"
                };
                warn!(
                    error = %WidgetError::missing_element(WIDGET, missing),
                    "search controller not activated"
                );
                return None;
            }
        };

        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(error = %WidgetError::no_runtime(WIDGET), "search controller not activated");
                return None;
            }
        };

        let disabled = options
            .config
            .disabled
            .unwrap_or_else(|| root.has_class("disabled") || input.is_disabled());

        let ctx = SearchContext {
            root,
            input,
            status,
            results,
            delay: options.config.delay(),
            min_length: options.config.min_length,
            disabled,
        };

        let mut display = DisplayState::default();
        {
            let mut projector = Projector::new(&ctx, &mut display);
            projector.set_disabled(disabled);
            projector.reset();
        }

        if options.search.is_none() {
            debug!("bound without a search capability; lookups will be skipped");
        }

        let inner = Inner {
            phase: ControllerState::Idle,
            disabled,
            debounce: Debouncer::new(options.config.delay()),
            sequence: SequenceGuard::new(),
            cache: Vec::new(),
            display,
        };

        Some(Self {
            shared: Arc::new(Shared {
                ctx,
                options,
                runtime,
                inner: Mutex::new(inner),
            }),
        })
    }

    /// Bind every root, skipping the ones that fail to activate
    pub fn bind_all<I>(roots: I, options: &SearchOptions) -> Vec<Self>
    where
        I: IntoIterator<Item = ElementRef>,
    {
        roots
            .into_iter()
            .filter_map(|root| Self::bind(root, options.clone()))
            .collect()
    }

    /// Input-change event: read the input element and reschedule
    pub fn on_input(&self) {
        let value = self.shared.ctx.input.value();
        Shared::schedule(&self.shared, value);
    }

    /// Set the input's value, then handle it as an input-change event
    pub fn input(&self, value: &str) {
        self.shared.ctx.input.set_value(value);
        self.on_input();
    }

    /// Pick a cached result by id
    ///
    /// Unknown ids (cleared cache, id from a superseded list) and selections
    /// while disabled are silent no-ops returning `None`.
    pub fn select(&self, id: &str) -> Option<ResultItem> {
        self.shared.select(id)
    }

    /// Change the disabled flag; pending timers and lookups are left alone
    pub fn set_disabled(&self, disabled: bool) {
        let mut inner = self.shared.lock();
        inner.disabled = disabled;
        let Inner { display, .. } = &mut *inner;
        Projector::new(&self.shared.ctx, display).set_disabled(disabled);
    }

    pub fn is_disabled(&self) -> bool {
        self.shared.lock().disabled
    }

    pub fn state(&self) -> ControllerState {
        self.shared.lock().phase.clone()
    }

    pub fn display(&self) -> DisplayState {
        self.shared.lock().display.clone()
    }

    pub fn cached_results(&self) -> Vec<ResultItem> {
        self.shared.lock().cache.clone()
    }

    /// Sequence number of the most recently issued lookup (0 before any)
    pub fn last_issued(&self) -> u64 {
        self.shared.lock().sequence.last_issued()
    }

    /// Whether a debounce timer is armed
    pub fn is_pending(&self) -> bool {
        self.shared.lock().debounce.is_pending()
    }

    /// Query the armed timer will issue, if any
    pub fn pending_query(&self) -> Option<String> {
        self.shared.lock().debounce.pending_query().map(str::to_string)
    }

    pub fn context(&self) -> &SearchContext {
        &self.shared.ctx
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SearchEvent) {
        if let Some(tx) = &self.options.events {
            let _ = tx.send(event);
        }
    }

    fn schedule(this: &Arc<Self>, value: String) {
        this.emit(SearchEvent::InputChanged {
            timestamp: Utc::now(),
            value: value.clone(),
        });

        let mut inner = this.lock();
        inner.debounce.cancel();

        let trimmed = value.trim();
        if inner.disabled || trimmed.chars().count() < this.ctx.min_length {
            this.clear(&mut inner);
            this.emit(SearchEvent::Cleared {
                timestamp: Utc::now(),
            });
            return;
        }

        let query = trimmed.to_string();
        let shared = Arc::clone(this);
        let runtime = this.runtime.clone();
        inner.debounce.arm(query.clone(), move |generation, deadline| {
            runtime.spawn(async move {
                tokio::time::sleep_until(deadline).await;
                shared.fire(generation).await;
            })
        });
        inner.phase = ControllerState::PendingDebounce {
            query: query.clone(),
        };

        debug!(query = %query, delay_ms = this.options.config.delay_ms, "debounce armed");
        this.emit(SearchEvent::Armed {
            timestamp: Utc::now(),
            query,
            delay_ms: this.options.config.delay_ms,
        });
    }

    /// Below-minimum / disabled path: synchronous and idempotent
    fn clear(&self, inner: &mut Inner) {
        inner.debounce.cancel();
        inner.cache.clear();
        inner.phase = ControllerState::Idle;
        Projector::new(&self.ctx, &mut inner.display).reset();
    }

    async fn fire(self: Arc<Self>, generation: u64) {
        let (request, query, provider) = {
            let mut inner = self.lock();
            let Some(query) = inner.debounce.fire(generation) else {
                return;
            };

            if inner.disabled {
                debug!(query = %query, "controller disabled, lookup not issued");
                inner.phase = ControllerState::Idle;
                self.emit(SearchEvent::Skipped {
                    timestamp: Utc::now(),
                    query,
                    reason: "disabled".into(),
                });
                return;
            }

            let Some(provider) = self.options.search.clone() else {
                warn!(
                    error = %WidgetError::missing_capability(WIDGET, "search"),
                    "lookup not issued"
                );
                inner.phase = ControllerState::Idle;
                self.emit(SearchEvent::Skipped {
                    timestamp: Utc::now(),
                    query,
                    reason: "missing_search".into(),
                });
                return;
            };

            let request = inner.sequence.issue();
            inner.phase = ControllerState::Loading {
                request,
                query: query.clone(),
            };
            let mut projector = Projector::new(&self.ctx, &mut inner.display);
            projector.set_loading(true);
            projector.set_status(LOADING_STATUS);

            (request, query, provider)
        };

        debug!(%request, query = %query, "lookup issued");
        self.emit(SearchEvent::Issued {
            timestamp: Utc::now(),
            request: request.0,
            query: query.clone(),
        });

        let outcome = provider.search(&query, &self.ctx).await;
        self.complete(request, outcome);
    }

    fn complete(&self, request: RequestId, outcome: SearchOutcome) {
        let accepted = {
            let mut inner = self.lock();

            if !inner.sequence.is_current(request) {
                let latest = inner.sequence.last_issued();
                debug!(%request, latest, "stale outcome discarded");
                self.emit(SearchEvent::Discarded {
                    timestamp: Utc::now(),
                    request: request.0,
                    latest,
                });
                return;
            }

            // A newer keystroke owns the phase; the display still updates.
            let timer_pending = inner.debounce.is_pending();
            let Inner {
                phase,
                cache,
                display,
                ..
            } = &mut *inner;
            let mut projector = Projector::new(&self.ctx, display);
            projector.set_loading(false);

            match outcome {
                Ok(items) => {
                    let items = items.unwrap_or_default();
                    if items.is_empty() {
                        projector.set_status(EMPTY_STATUS);
                        projector.clear_results();
                        cache.clear();
                    } else {
                        projector.set_status("");
                        projector.show_results(&items);
                        *cache = items.clone();
                    }
                    if !timer_pending {
                        *phase = ControllerState::Resolved {
                            items: items.clone(),
                        };
                    }
                    debug!(%request, count = items.len(), "lookup resolved");
                    self.emit(SearchEvent::Resolved {
                        timestamp: Utc::now(),
                        request: request.0,
                        items: items.clone(),
                    });
                    Accepted::Results(items)
                }
                Err(err) => {
                    projector.set_status(FAILURE_STATUS);
                    if !timer_pending {
                        *phase = ControllerState::Errored {
                            request,
                            message: err.to_string(),
                        };
                    }
                    self.emit(SearchEvent::Failed {
                        timestamp: Utc::now(),
                        request: request.0,
                        message: format!("{:#}", err),
                    });
                    Accepted::Failure(err)
                }
            }
        };

        match accepted {
            Accepted::Results(items) => {
                if let Some(on_results) = &self.options.on_results {
                    on_results(&items, &self.ctx);
                }
            }
            Accepted::Failure(err) => match &self.options.on_error {
                Some(on_error) => on_error(&err, &self.ctx),
                None => error!("search lookup failed: {:#}", err),
            },
        }
    }

    fn select(&self, id: &str) -> Option<ResultItem> {
        let selected = {
            let mut inner = self.lock();
            if inner.disabled {
                return None;
            }
            let item = inner.cache.iter().find(|item| item.id == id).cloned()?;

            self.ctx.input.set_value(&item.label);
            self.ctx.input.focus();

            inner.debounce.cancel();
            inner.cache.clear();
            // An in-flight lookup keeps its phase and loading flag until it lands
            if !inner.phase.is_loading() {
                inner.phase = ControllerState::Idle;
            }

            let mut projector = Projector::new(&self.ctx, &mut inner.display);
            projector.clear_results();
            projector.set_status("");

            item
        };

        debug!(id = %selected.id, label = %selected.label, "result selected");
        self.emit(SearchEvent::Selected {
            timestamp: Utc::now(),
            id: selected.id.clone(),
            label: selected.label.clone(),
        });

        if let Some(on_select) = &self.options.on_select {
            on_select(&selected, &self.ctx);
        }

        Some(selected)
    }
}
