//! Small finite-state widgets that sit next to the search controller

pub mod async_switch;
pub mod loading_button;
pub mod switch;
pub mod tabs;
pub mod toast;

pub use async_switch::{save_fn, AsyncSwitch, AsyncSwitchOptions, SaveAction};
pub use loading_button::{action_fn, ButtonAction, LoadingButton, LoadingButtonOptions};
pub use switch::{Switch, SwitchOptions};
pub use tabs::Tabs;
pub use toast::{Notifier, Toast, ToastQueue, ToastVariant};
