//! Debounced search input
//!
//! - `controller`: binding, debounce, issuance, result projection, selection
//! - `debounce`: single-slot timer
//! - `sequence`: last-issued-wins guard
//! - `state`: explicit controller phase and display snapshot
//! - `provider`: lookup capability seam
//! - `catalog` / `fuzzy`: in-memory provider used by the CLI

pub mod catalog;
pub mod controller;
mod debounce;
pub mod fuzzy;
pub mod options;
pub mod provider;
pub mod sequence;
pub mod state;

pub use catalog::CatalogSearch;
pub use controller::SearchController;
pub use options::{SearchContext, SearchOptions};
pub use provider::{search_fn, MockSearch, SearchOutcome, SearchProvider};
pub use sequence::RequestId;
pub use state::{ControllerState, DisplayState, EMPTY_STATUS, FAILURE_STATUS, LOADING_STATUS};
