pub mod config;
pub mod element;
pub mod error;
pub mod events;
pub mod item;
pub mod search;
pub mod widgets;

pub use config::{LoadingButtonConfig, SearchConfig, ToastConfig, WidgetsConfig};
pub use element::{Element, ElementRef, MemoryElement, Rect};
pub use error::{Result, WidgetError};
pub use events::SearchEvent;
pub use item::ResultItem;
pub use search::{
    CatalogSearch, ControllerState, DisplayState, SearchContext, SearchController, SearchOptions,
    SearchProvider,
};
