use serde::Serialize;

use crate::item::ResultItem;
use crate::search::options::SearchContext;
use crate::search::sequence::RequestId;

/// Status shown while the current lookup is in flight
pub const LOADING_STATUS: &str = "Loading...";
/// Status shown when the current lookup returned nothing
pub const EMPTY_STATUS: &str = "No results";
/// Status shown when the current lookup failed
pub const FAILURE_STATUS: &str = "Something went wrong";

/// Class toggled on the root element while a lookup is in flight
pub const LOADING_CLASS: &str = "loading";

/// Lifecycle phase of a search controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ControllerState {
    /// No query, or a query below the minimum length
    Idle,
    /// Timer armed, nothing issued yet for this query
    PendingDebounce { query: String },
    /// The current request is in flight
    Loading { request: RequestId, query: String },
    /// Results rendered for the current request (possibly empty)
    Resolved { items: Vec<ResultItem> },
    /// The current request failed; earlier results stay on screen
    Errored { request: RequestId, message: String },
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::PendingDebounce { .. } => "pending_debounce",
            ControllerState::Loading { .. } => "loading",
            ControllerState::Resolved { .. } => "resolved",
            ControllerState::Errored { .. } => "errored",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ControllerState::Loading { .. })
    }
}

/// What the bound elements currently show
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub status: String,
    pub loading: bool,
    pub items: Vec<ResultItem>,
    pub disabled: bool,
}

/// Writes display changes through to the bound elements
///
/// Keeps the [`DisplayState`] snapshot and the elements in lockstep so
/// `display()` always describes what the host is showing.
pub(crate) struct Projector<'a> {
    ctx: &'a SearchContext,
    display: &'a mut DisplayState,
}

impl<'a> Projector<'a> {
    pub fn new(ctx: &'a SearchContext, display: &'a mut DisplayState) -> Self {
        Self { ctx, display }
    }

    pub fn set_status(&mut self, text: &str) {
        self.display.status = text.to_string();
        self.ctx.status.set_text(text);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.display.loading = loading;
        self.ctx.root.toggle_class(LOADING_CLASS, loading);
    }

    pub fn show_results(&mut self, items: &[ResultItem]) {
        self.display.items = items.to_vec();
        self.ctx.results.render_items(items);
    }

    pub fn clear_results(&mut self) {
        self.display.items.clear();
        self.ctx.results.render_items(&[]);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.display.disabled = disabled;
        self.ctx.input.set_disabled(disabled);
    }

    /// Empty list, empty status, loading off
    pub fn reset(&mut self) {
        self.set_loading(false);
        self.set_status("");
        self.clear_results();
    }
}
