//! Tabs with a sliding indicator

use crate::element::ElementRef;

/// Tab strip bound to a container
///
/// Expects `.tab` children keyed by `data-tab`, `.tab-panel` children keyed
/// by `data-panel`, and optionally a `.tab-indicator` and a `.tab-list`
/// (the indicator's positioning origin, defaulting to the container).
#[derive(Clone)]
pub struct Tabs {
    container: ElementRef,
    list: ElementRef,
    tabs: Vec<ElementRef>,
    panels: Vec<ElementRef>,
    indicator: Option<ElementRef>,
}

impl Tabs {
    pub fn bind(container: ElementRef) -> Self {
        let list = container
            .find("tab-list")
            .unwrap_or_else(|| container.clone());
        let tabs = container.find_all("tab");
        let panels = container.find_all("tab-panel");
        let indicator = container.find("tab-indicator");

        let bound = Self {
            container,
            list,
            tabs,
            panels,
            indicator,
        };
        bound.relayout();
        bound
    }

    /// Activate the tab whose `data-tab` equals `key`; unknown keys are ignored
    pub fn activate(&self, key: &str) -> bool {
        let Some(target) = self
            .tabs
            .iter()
            .find(|tab| tab.attr("data-tab").as_deref() == Some(key))
        else {
            return false;
        };

        for tab in &self.tabs {
            tab.toggle_class("active", false);
        }
        target.toggle_class("active", true);

        self.move_indicator(target);

        for panel in &self.panels {
            let matches = panel.attr("data-panel").as_deref() == Some(key);
            panel.toggle_class("active", matches);
        }

        true
    }

    /// Re-position the indicator under the active tab (after a resize)
    pub fn relayout(&self) {
        if let Some(active) = self.tabs.iter().find(|tab| tab.has_class("active")) {
            self.move_indicator(active);
        }
    }

    /// `data-tab` of the active tab
    pub fn active(&self) -> Option<String> {
        self.tabs
            .iter()
            .find(|tab| tab.has_class("active"))
            .and_then(|tab| tab.attr("data-tab"))
    }

    pub fn container(&self) -> &ElementRef {
        &self.container
    }

    fn move_indicator(&self, tab: &ElementRef) {
        let Some(indicator) = &self.indicator else {
            return;
        };

        let tab_rect = tab.bounds();
        let list_rect = self.list.bounds();

        indicator.set_style("width", &format!("{}px", tab_rect.width));
        indicator.set_style(
            "transform",
            &format!("translateX({}px) scaleX(1)", tab_rect.left - list_rect.left),
        );
        indicator.set_style("opacity", "1");
    }
}
