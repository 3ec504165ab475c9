//! Switch that only flips after its save capability succeeds

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{error, warn};

use crate::element::ElementRef;
use crate::error::WidgetError;
use crate::widgets::switch::ChangeCallback;
use crate::widgets::toast::{Notifier, ToastVariant};

const WIDGET: &str = "AsyncSwitch";

pub const SAVE_FAILED_MESSAGE: &str = "Request failed. Please try again.";

/// Persists the requested switch state
#[async_trait]
pub trait SaveAction: Send + Sync {
    async fn save(&self, next: bool, element: &ElementRef) -> anyhow::Result<()>;
}

pub struct FnSave<F>(F);

#[async_trait]
impl<F, Fut> SaveAction for FnSave<F>
where
    F: Fn(bool, ElementRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn save(&self, next: bool, element: &ElementRef) -> anyhow::Result<()> {
        (self.0)(next, Arc::clone(element)).await
    }
}

pub fn save_fn<F, Fut>(f: F) -> Arc<dyn SaveAction>
where
    F: Fn(bool, ElementRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(FnSave(f))
}

#[derive(Clone, Default)]
pub struct AsyncSwitchOptions {
    pub disabled: Option<bool>,
    pub save: Option<Arc<dyn SaveAction>>,
    pub on_change: Option<ChangeCallback>,
    pub toast: Option<Arc<dyn Notifier>>,
}

impl AsyncSwitchOptions {
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn save(mut self, save: Arc<dyn SaveAction>) -> Self {
        self.save = Some(save);
        self
    }

    pub fn on_change(mut self, f: impl Fn(bool, &ElementRef) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub fn toast(mut self, toast: Arc<dyn Notifier>) -> Self {
        self.toast = Some(toast);
        self
    }
}

#[derive(Debug, Default)]
struct SwitchState {
    on: bool,
    saving: bool,
}

/// Pessimistic toggle
///
/// A click requests the opposite state; the switch shows `loading` and
/// ignores further clicks until `save` settles, and only then adopts the new
/// state. A failed save leaves the state unchanged and raises a toast.
#[derive(Clone)]
pub struct AsyncSwitch {
    element: ElementRef,
    disabled: bool,
    options: AsyncSwitchOptions,
    state: Arc<Mutex<SwitchState>>,
}

impl AsyncSwitch {
    pub fn bind(element: ElementRef, options: AsyncSwitchOptions) -> Self {
        let disabled = options
            .disabled
            .unwrap_or_else(|| element.has_class("disabled"));
        let on = element.has_class("on");

        let switch = Self {
            element,
            disabled,
            options,
            state: Arc::new(Mutex::new(SwitchState { on, saving: false })),
        };
        switch.render();
        switch
    }

    pub async fn click(&self) {
        if self.disabled {
            return;
        }
        let next = !self.lock().on;
        self.commit(next).await;
    }

    async fn commit(&self, next: bool) {
        let Some(save) = self.options.save.clone() else {
            warn!(error = %WidgetError::missing_capability(WIDGET, "save"), "switch not saved");
            return;
        };

        {
            let mut state = self.lock();
            if state.saving {
                return;
            }
            state.saving = true;
        }
        self.render();

        match save.save(next, &self.element).await {
            Ok(()) => {
                self.lock().on = next;
                if let Some(on_change) = &self.options.on_change {
                    on_change(next, &self.element);
                }
            }
            Err(err) => {
                self.notify(SAVE_FAILED_MESSAGE);
                error!("switch save failed: {:#}", err);
            }
        }

        self.lock().saving = false;
        self.render();
    }

    fn notify(&self, message: &str) {
        match &self.options.toast {
            Some(toast) => toast.notify(message, ToastVariant::Error),
            None => warn!("{}", message),
        }
    }

    fn render(&self) {
        let (on, saving) = {
            let state = self.lock();
            (state.on, state.saving)
        };
        self.element.toggle_class("on", on);
        self.element.toggle_class("disabled", self.disabled || saving);
        self.element.toggle_class("loading", saving);
    }

    pub fn is_on(&self) -> bool {
        self.lock().on
    }

    pub fn is_saving(&self) -> bool {
        self.lock().saving
    }

    fn lock(&self) -> MutexGuard<'_, SwitchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
