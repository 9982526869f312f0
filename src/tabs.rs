use crate::registry::{ViewId, ViewRegistry};
use crate::storage::KeyValueStore;
use crate::surface::{APP_TITLE, Element, Surface};
use tracing::{debug, info, warn};

pub const SELECTION_KEY: &str = "currentTab";

const ACTIVE_CLASS: &str = "active";

pub type SelectionListener = Box<dyn Fn(ViewId) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct TabConfig {
    pub default_view: ViewId,
    pub storage_key: String,
    pub app_version: String,
}

impl Default for TabConfig {
    fn default() -> Self {
        Self {
            default_view: 1,
            storage_key: SELECTION_KEY.to_string(),
            app_version: String::new(),
        }
    }
}

/// Owns the selected view and keeps the surface and the store in step with it.
///
/// Every operation is total. An id outside the registry still becomes the
/// current selection and is persisted; no tab is active and no container is shown.
pub struct TabController<S, K> {
    registry: ViewRegistry,
    surface: S,
    store: K,
    config: TabConfig,
    active: Option<ViewId>,
    listeners: Vec<SelectionListener>,
}

impl<S: Surface, K: KeyValueStore> TabController<S, K> {
    pub fn new(registry: ViewRegistry, surface: S, store: K, mut config: TabConfig) -> Self {
        if !registry.contains(config.default_view) {
            warn!(
                default_view = config.default_view,
                "default view outside the registry, using view 1"
            );
            config.default_view = 1;
        }

        Self {
            registry,
            surface,
            store,
            config,
            active: None,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(ViewId) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn current(&self) -> Option<ViewId> {
        self.active
    }

    pub fn switch_to(&mut self, view: ViewId) {
        self.active = Some(view);

        if !self.registry.contains(view) {
            warn!(view, "selected view is outside the registry; nothing will be shown");
        }
        self.render(view);

        self.store.set(&self.config.storage_key, &view.to_string());

        for listener in &self.listeners {
            listener(view);
        }
        info!(view, "view selected");
    }

    /// Switches to the persisted view when it is still valid, else to the default.
    pub fn restore_or_default(&mut self) {
        let persisted = self
            .store
            .get(&self.config.storage_key)
            .and_then(|value| value.trim().parse::<ViewId>().ok())
            .filter(|view| self.registry.contains(*view));

        match persisted {
            Some(view) => {
                debug!(view, "restoring persisted view");
                self.switch_to(view);
            }
            None => self.switch_to(self.config.default_view),
        }
    }

    /// Greys a tab out or back in. Selection is not touched, even for the active view.
    pub fn set_enabled(&mut self, view: ViewId, enabled: bool) {
        let Some(tab) = self.surface.tab(view) else {
            debug!(view, "no tab rendered for view");
            return;
        };

        tab.disabled = !enabled;
        if enabled {
            tab.set_style("opacity", "1");
            tab.set_style("cursor", "pointer");
        } else {
            tab.set_style("opacity", "0.5");
            tab.set_style("cursor", "not-allowed");
        }
        info!(view, enabled, "tab availability changed");
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    fn render(&mut self, view: ViewId) {
        for id in 1..=self.registry.count() {
            let active = id == view;

            match self.surface.tab(id) {
                Some(tab) => apply_tab_style(tab, active),
                None => debug!(view = id, "no tab rendered for view"),
            }
            match self.surface.container(id) {
                Some(container) => container.set_hidden(!active),
                None => debug!(view = id, "no container rendered for view"),
            }
        }

        let title = self.registry.describe(view).display_title();
        if let Some(element) = self.surface.element(APP_TITLE) {
            element.text = if self.config.app_version.is_empty() {
                title
            } else {
                format!("{title} {}", self.config.app_version)
            };
        }
    }
}

fn apply_tab_style(tab: &mut Element, active: bool) {
    if active {
        tab.add_class(ACTIVE_CLASS);
        tab.set_style("background", "#007bff");
        tab.set_style("color", "white");
    } else {
        tab.remove_class(ACTIVE_CLASS);
        tab.set_style("background", "#f8f9fa");
        tab.set_style("color", "#495057");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preferences;
    use crate::registry::DEFAULT_VIEW_COUNT;
    use crate::surface::DomSurface;
    use std::sync::{Arc, Mutex};

    fn controller() -> TabController<DomSurface, Preferences> {
        controller_with(Preferences::default())
    }

    fn controller_with(prefs: Preferences) -> TabController<DomSurface, Preferences> {
        let registry = ViewRegistry::with_defaults(DEFAULT_VIEW_COUNT).unwrap();
        let surface = DomSurface::build(&registry);
        let config = TabConfig {
            app_version: "v2.15".to_string(),
            ..TabConfig::default()
        };
        TabController::new(registry, surface, prefs, config)
    }

    fn active_tabs(tabs: &TabController<DomSurface, Preferences>) -> Vec<ViewId> {
        tabs.surface()
            .tabs()
            .filter(|(_, tab)| tab.has_class(ACTIVE_CLASS))
            .map(|(id, _)| id)
            .collect()
    }

    #[test]
    fn nothing_selected_before_first_switch() {
        let tabs = controller();
        assert_eq!(tabs.current(), None);
        assert!(tabs.surface().visible_containers().is_empty());
    }

    #[test]
    fn every_valid_view_shows_exactly_one_container() {
        let mut tabs = controller();
        for view in 1..=DEFAULT_VIEW_COUNT {
            tabs.switch_to(view);
            assert_eq!(tabs.current(), Some(view));
            assert_eq!(tabs.surface().visible_containers(), vec![view]);
            assert_eq!(active_tabs(&tabs), vec![view]);
        }
    }

    #[test]
    fn active_and_inactive_styles() {
        let mut tabs = controller();
        tabs.switch_to(2);

        let active = tabs.surface().tab_ref(2).unwrap();
        assert_eq!(active.style("background"), Some("#007bff"));
        assert_eq!(active.style("color"), Some("white"));

        let inactive = tabs.surface().tab_ref(1).unwrap();
        assert_eq!(inactive.style("background"), Some("#f8f9fa"));
        assert_eq!(inactive.style("color"), Some("#495057"));

        let title = tabs.surface().get(APP_TITLE).unwrap();
        assert_eq!(title.text, "🛏️ Sleep Tracker v2.15");
    }

    #[test]
    fn switching_twice_is_idempotent() {
        let mut tabs = controller();
        tabs.switch_to(3);
        let first = tabs.surface().clone();
        tabs.switch_to(3);

        assert_eq!(tabs.current(), Some(3));
        assert_eq!(tabs.surface().visible_containers(), vec![3]);
        assert_eq!(
            first.tabs().collect::<Vec<_>>(),
            tabs.surface().tabs().collect::<Vec<_>>()
        );
        assert_eq!(tabs.store().entries.get(SELECTION_KEY).map(String::as_str), Some("3"));
    }

    #[test]
    fn restore_picks_up_persisted_view() {
        let mut tabs = controller();
        tabs.switch_to(7);
        let persisted = tabs.store().clone();

        let mut restored = controller_with(persisted);
        restored.restore_or_default();
        assert_eq!(restored.current(), Some(7));
        assert_eq!(restored.surface().visible_containers(), vec![7]);
    }

    #[test]
    fn restore_without_persisted_value_uses_default() {
        let mut tabs = controller();
        tabs.restore_or_default();
        assert_eq!(tabs.current(), Some(1));
        assert_eq!(tabs.surface().visible_containers(), vec![1]);
    }

    #[test]
    fn restore_ignores_unusable_persisted_values() {
        for stored in ["999", "0", "weight", ""] {
            let mut prefs = Preferences::default();
            prefs.set(SELECTION_KEY, stored);
            let mut tabs = controller_with(prefs);
            tabs.restore_or_default();
            assert_eq!(tabs.current(), Some(1), "stored value {stored:?}");
        }
    }

    #[test]
    fn out_of_range_view_is_current_but_hides_everything() {
        let mut tabs = controller();
        tabs.switch_to(4);
        tabs.switch_to(999);

        assert_eq!(tabs.current(), Some(999));
        assert!(tabs.surface().visible_containers().is_empty());
        assert!(active_tabs(&tabs).is_empty());
        assert_eq!(
            tabs.surface().get(APP_TITLE).unwrap().text,
            "🔧 Not implemented v2.15"
        );
        assert_eq!(
            tabs.store().entries.get(SELECTION_KEY).map(String::as_str),
            Some("999")
        );
    }

    #[test]
    fn out_of_range_first_selection_leaves_everything_hidden() {
        let mut tabs = controller();
        tabs.switch_to(999);
        assert_eq!(tabs.current(), Some(999));
        assert!(tabs.surface().visible_containers().is_empty());
    }

    #[test]
    fn listeners_hear_every_switch_in_order() {
        let mut tabs = controller();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        tabs.subscribe(move |view| sink.lock().unwrap().push(view));

        tabs.switch_to(2);
        tabs.switch_to(2);
        tabs.switch_to(999);

        assert_eq!(*seen.lock().unwrap(), vec![2, 2, 999]);
    }

    #[test]
    fn disabling_active_view_keeps_selection() {
        let mut tabs = controller();
        tabs.switch_to(5);
        tabs.set_enabled(5, false);

        assert_eq!(tabs.current(), Some(5));
        assert_eq!(tabs.surface().visible_containers(), vec![5]);
        let tab = tabs.surface().tab_ref(5).unwrap();
        assert!(tab.disabled);
        assert_eq!(tab.style("opacity"), Some("0.5"));
        assert_eq!(tab.style("cursor"), Some("not-allowed"));

        tabs.set_enabled(5, true);
        let tab = tabs.surface().tab_ref(5).unwrap();
        assert!(!tab.disabled);
        assert_eq!(tab.style("cursor"), Some("pointer"));
    }

    #[test]
    fn missing_elements_are_skipped() {
        let registry = ViewRegistry::with_defaults(4).unwrap();
        let mut surface = DomSurface::new();
        surface.mount_view(&registry.describe(1));
        surface.mount_view(&registry.describe(3));
        let mut tabs = TabController::new(registry, surface, Preferences::default(), TabConfig::default());

        tabs.switch_to(2);
        assert_eq!(tabs.current(), Some(2));
        assert!(tabs.surface().visible_containers().is_empty());

        tabs.set_enabled(4, false);
        tabs.switch_to(3);
        assert_eq!(tabs.surface().visible_containers(), vec![3]);
    }

    #[test]
    fn invalid_default_falls_back_to_first_view() {
        let registry = ViewRegistry::with_defaults(4).unwrap();
        let surface = DomSurface::build(&registry);
        let config = TabConfig {
            default_view: 12,
            ..TabConfig::default()
        };
        let mut tabs = TabController::new(registry, surface, Preferences::default(), config);
        tabs.restore_or_default();
        assert_eq!(tabs.current(), Some(1));
    }
}
