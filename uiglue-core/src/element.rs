//! Binding seam between widgets and the host's markup
//!
//! Widgets never own rendering. They read and write a handful of element
//! properties (classes, text, value, disabled flag, inline styles) through
//! the [`Element`] trait, which a host implements over its real UI tree.
//! [`MemoryElement`] is an in-memory implementation for tests and headless
//! hosts such as the `uiglue` CLI.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::item::ResultItem;

/// Shared handle to a bound element
pub type ElementRef = Arc<dyn Element>;

/// Layout box of an element, in host units (pixels for a browser host)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A piece of markup a widget is attached to
pub trait Element: Send + Sync {
    /// First descendant carrying `class`, depth first
    fn find(&self, class: &str) -> Option<ElementRef>;

    /// Every descendant carrying `class`, in document order
    fn find_all(&self, class: &str) -> Vec<ElementRef>;

    fn has_class(&self, class: &str) -> bool;

    /// Add `class` when `on`, remove it otherwise
    fn toggle_class(&self, class: &str, on: bool);

    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    /// Current value of an input-like element
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    fn focus(&self) {}

    /// Data attribute lookup (`data-tab`, `data-panel`, ...)
    fn attr(&self, name: &str) -> Option<String>;

    fn set_style(&self, property: &str, value: &str);

    fn style(&self, property: &str) -> Option<String>;

    fn bounds(&self) -> Rect {
        Rect::default()
    }

    /// Replace the element's list entries; an empty slice clears the list
    fn render_items(&self, items: &[ResultItem]);
}

#[derive(Debug, Default)]
struct ElementState {
    classes: BTreeSet<String>,
    text: String,
    value: String,
    disabled: bool,
    focused: bool,
    attrs: HashMap<String, String>,
    styles: BTreeMap<String, String>,
    bounds: Rect,
    items: Vec<ResultItem>,
}

/// In-memory element tree
#[derive(Default)]
pub struct MemoryElement {
    state: Mutex<ElementState>,
    children: Vec<Arc<MemoryElement>>,
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MemoryElement")
            .field("classes", &state.classes)
            .field("text", &state.text)
            .field("children", &self.children.len())
            .finish()
    }
}

impl MemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        classes.iter().fold(Self::new(), |el, c| el.with_class(c))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.state().classes.insert(class.to_string());
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.state().text = text.to_string();
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.state().value = value.to_string();
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.state()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_bounds(self, bounds: Rect) -> Self {
        self.state().bounds = bounds;
        self
    }

    pub fn disabled(self) -> Self {
        self.state().disabled = true;
        self
    }

    pub fn with_child(mut self, child: MemoryElement) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn into_ref(self) -> Arc<MemoryElement> {
        Arc::new(self)
    }

    /// Typed variant of [`Element::find`], for inspection in tests
    pub fn child(&self, class: &str) -> Option<Arc<MemoryElement>> {
        for child in &self.children {
            if child.has_class(class) {
                return Some(Arc::clone(child));
            }
            if let Some(found) = child.child(class) {
                return Some(found);
            }
        }
        None
    }

    pub fn children_with(&self, class: &str) -> Vec<Arc<MemoryElement>> {
        let mut out = Vec::new();
        self.collect(class, &mut out);
        out
    }

    fn collect(&self, class: &str, out: &mut Vec<Arc<MemoryElement>>) {
        for child in &self.children {
            if child.has_class(class) {
                out.push(Arc::clone(child));
            }
            child.collect(class, out);
        }
    }

    pub fn classes(&self) -> Vec<String> {
        self.state().classes.iter().cloned().collect()
    }

    /// Entries last rendered through [`Element::render_items`]
    pub fn items(&self) -> Vec<ResultItem> {
        self.state().items.clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.state().items.iter().map(|i| i.label.clone()).collect()
    }

    pub fn is_focused(&self) -> bool {
        self.state().focused
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.state().bounds = bounds;
    }

    fn state(&self) -> MutexGuard<'_, ElementState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Element for MemoryElement {
    fn find(&self, class: &str) -> Option<ElementRef> {
        self.child(class).map(|c| c as ElementRef)
    }

    fn find_all(&self, class: &str) -> Vec<ElementRef> {
        self.children_with(class)
            .into_iter()
            .map(|c| c as ElementRef)
            .collect()
    }

    fn has_class(&self, class: &str) -> bool {
        self.state().classes.contains(class)
    }

    fn toggle_class(&self, class: &str, on: bool) {
        let mut state = self.state();
        if on {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
    }

    fn text(&self) -> String {
        self.state().text.clone()
    }

    fn set_text(&self, text: &str) {
        self.state().text = text.to_string();
    }

    fn value(&self) -> String {
        self.state().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.state().value = value.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.state().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state().disabled = disabled;
    }

    fn focus(&self) {
        self.state().focused = true;
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.state().attrs.get(name).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn style(&self, property: &str) -> Option<String> {
        self.state().styles.get(property).cloned()
    }

    fn bounds(&self) -> Rect {
        self.state().bounds
    }

    fn render_items(&self, items: &[ResultItem]) {
        self.state().items = items.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Arc<MemoryElement> {
        MemoryElement::with_classes(&["root"])
            .with_child(
                MemoryElement::with_classes(&["row"])
                    .with_child(MemoryElement::with_classes(&["cell", "first"])),
            )
            .with_child(MemoryElement::with_classes(&["cell"]))
            .into_ref()
    }

    #[test]
    fn test_find_is_depth_first() {
        let root = tree();
        let first = root.child("cell").unwrap();
        assert!(first.has_class("first"));
        assert_eq!(root.find_all("cell").len(), 2);
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_toggle_class() {
        let el = MemoryElement::new();
        el.toggle_class("on", true);
        assert!(el.has_class("on"));
        el.toggle_class("on", true);
        el.toggle_class("on", false);
        assert!(!el.has_class("on"));
        assert!(el.classes().is_empty());
    }

    #[test]
    fn test_render_items_replaces_list() {
        let el = MemoryElement::new();
        el.render_items(&[ResultItem::new("1", "Alpha"), ResultItem::new("2", "Beta")]);
        assert_eq!(el.labels(), vec!["Alpha", "Beta"]);
        el.render_items(&[]);
        assert!(el.items().is_empty());
    }
}
