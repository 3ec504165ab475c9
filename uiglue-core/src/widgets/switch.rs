use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::element::ElementRef;

pub type ChangeCallback = Arc<dyn Fn(bool, &ElementRef) + Send + Sync>;

#[derive(Clone, Default)]
pub struct SwitchOptions {
    /// Unset means "disabled if the element has the `disabled` class"
    pub disabled: Option<bool>,
    pub on_change: Option<ChangeCallback>,
}

impl SwitchOptions {
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn on_change(mut self, f: impl Fn(bool, &ElementRef) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }
}

/// On/off toggle mirrored by the `on` class
#[derive(Clone)]
pub struct Switch {
    element: ElementRef,
    disabled: bool,
    on: Arc<AtomicBool>,
    on_change: Option<ChangeCallback>,
}

impl Switch {
    pub fn bind(element: ElementRef, options: SwitchOptions) -> Self {
        let disabled = options
            .disabled
            .unwrap_or_else(|| element.has_class("disabled"));
        let on = element.has_class("on");

        element.toggle_class("disabled", disabled);

        Self {
            element,
            disabled,
            on: Arc::new(AtomicBool::new(on)),
            on_change: options.on_change,
        }
    }

    pub fn bind_all<I>(elements: I, options: &SwitchOptions) -> Vec<Self>
    where
        I: IntoIterator<Item = ElementRef>,
    {
        elements
            .into_iter()
            .map(|el| Self::bind(el, options.clone()))
            .collect()
    }

    pub fn click(&self) {
        self.set_state(!self.is_on());
    }

    /// No-op while disabled
    pub fn set_state(&self, next: bool) {
        if self.disabled {
            return;
        }

        self.on.store(next, Ordering::SeqCst);
        self.element.toggle_class("on", next);

        if let Some(on_change) = &self.on_change {
            on_change(next, &self.element);
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
