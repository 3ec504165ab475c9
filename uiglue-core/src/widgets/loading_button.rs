//! Button that disables itself and shows a spinner while its action runs

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, warn};

use crate::config::LoadingButtonConfig;
use crate::element::ElementRef;
use crate::error::WidgetError;
use crate::widgets::toast::{Notifier, ToastVariant};

const WIDGET: &str = "LoadingButton";

pub const ACTION_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";
pub const SPINNER_ICON: &str = "↻";

#[async_trait]
pub trait ButtonAction: Send + Sync {
    async fn run(&self, button: &ElementRef) -> anyhow::Result<Value>;
}

pub struct FnAction<F>(F);

#[async_trait]
impl<F, Fut> ButtonAction for FnAction<F>
where
    F: Fn(ElementRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    async fn run(&self, button: &ElementRef) -> anyhow::Result<Value> {
        (self.0)(Arc::clone(button)).await
    }
}

pub fn action_fn<F, Fut>(f: F) -> Arc<dyn ButtonAction>
where
    F: Fn(ElementRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    Arc::new(FnAction(f))
}

pub type SuccessCallback = Arc<dyn Fn(&Value, &ElementRef) + Send + Sync>;
pub type FailureCallback = Arc<dyn Fn(&anyhow::Error, &ElementRef) + Send + Sync>;

#[derive(Clone)]
pub struct LoadingButtonOptions {
    pub action: Option<Arc<dyn ButtonAction>>,
    pub disabled: Option<bool>,
    pub loading_text: String,
    pub toast: Option<Arc<dyn Notifier>>,
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<FailureCallback>,
}

impl Default for LoadingButtonOptions {
    fn default() -> Self {
        Self::new(&LoadingButtonConfig::default())
    }
}

impl LoadingButtonOptions {
    pub fn new(config: &LoadingButtonConfig) -> Self {
        Self {
            action: None,
            disabled: None,
            loading_text: config.loading_text.clone(),
            toast: None,
            on_success: None,
            on_error: None,
        }
    }

    pub fn action(mut self, action: Arc<dyn ButtonAction>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn toast(mut self, toast: Arc<dyn Notifier>) -> Self {
        self.toast = Some(toast);
        self
    }

    pub fn on_success(mut self, f: impl Fn(&Value, &ElementRef) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    pub fn on_error(
        mut self,
        f: impl Fn(&anyhow::Error, &ElementRef) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }
}

#[derive(Clone)]
pub struct LoadingButton {
    button: ElementRef,
    icon: Option<(ElementRef, String)>,
    text: Option<(ElementRef, String)>,
    disabled: bool,
    loading: Arc<AtomicBool>,
    options: LoadingButtonOptions,
}

impl LoadingButton {
    /// Bind to `button`; its optional `.icon` and `.text` children get
    /// swapped for a spinner and the loading text while the action runs
    pub fn bind(button: ElementRef, options: LoadingButtonOptions) -> Self {
        let disabled = options
            .disabled
            .unwrap_or_else(|| button.has_class("disabled"));
        let icon = button.find("icon").map(|el| {
            let original = el.text();
            (el, original)
        });
        let text = button.find("text").map(|el| {
            let original = el.text();
            (el, original)
        });

        let widget = Self {
            button,
            icon,
            text,
            disabled,
            loading: Arc::new(AtomicBool::new(false)),
            options,
        };
        widget.render();
        widget
    }

    /// Run the action; ignored while disabled or already loading
    pub async fn click(&self) {
        if self.disabled || self.is_loading() {
            return;
        }

        let Some(action) = self.options.action.clone() else {
            warn!(error = %WidgetError::missing_capability(WIDGET, "action"), "click ignored");
            return;
        };

        if self.loading.swap(true, Ordering::SeqCst) {
            return;
        }
        self.render();

        match action.run(&self.button).await {
            Ok(value) => {
                if let Some(on_success) = &self.options.on_success {
                    on_success(&value, &self.button);
                }
            }
            Err(err) => self.fail(err),
        }

        self.loading.store(false, Ordering::SeqCst);
        self.render();
    }

    fn fail(&self, err: anyhow::Error) {
        if let Some(on_error) = &self.options.on_error {
            on_error(&err, &self.button);
        } else if let Some(toast) = &self.options.toast {
            toast.notify(ACTION_FAILED_MESSAGE, ToastVariant::Error);
        } else {
            error!("button action failed: {:#}", err);
        }
    }

    fn render(&self) {
        let loading = self.is_loading();

        self.button.set_disabled(self.disabled || loading);
        self.button.toggle_class("loading", loading);

        if let Some((icon, original)) = &self.icon {
            icon.set_text(if loading { SPINNER_ICON } else { original });
        }
        if let Some((text, original)) = &self.text {
            text.set_text(if loading {
                &self.options.loading_text
            } else {
                original
            });
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
