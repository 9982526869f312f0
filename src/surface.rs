//! Element model the shell controllers write to.
//!
//! Controllers only toggle classes, inline style properties and a few flags
//! on elements handed to them through [`Surface`]. Markup is produced later
//! from a [`DomSurface`] snapshot by `ui::render_index`.

use crate::registry::{ViewDescriptor, ViewId, ViewRegistry};
use std::collections::{BTreeMap, BTreeSet};

pub const AUTH_SECTION: &str = "authSection";
pub const USER_INFO: &str = "userInfo";
pub const USER_NAME: &str = "userName";
pub const TAB_NAVIGATION: &str = "tabNavigation";
pub const APP_HEADER: &str = "appHeader";
pub const APP_TITLE: &str = "appTitle";

pub const HIDDEN_CLASS: &str = "hidden";

const TAB_COMMON_STYLE: [(&str, &str); 8] = [
    ("flex", "1"),
    ("min-width", "80px"),
    ("padding", "8px 10px"),
    ("border", "none"),
    ("cursor", "pointer"),
    ("border-radius", "5px 5px 0 0"),
    ("margin-right", "1px"),
    ("font-size", "12px"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: String,
    pub text: String,
    pub disabled: bool,
    classes: BTreeSet<String>,
    style: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class(HIDDEN_CLASS)
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            self.add_class(HIDDEN_CLASS);
        } else {
            self.remove_class(HIDDEN_CLASS);
        }
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        self.style.insert(property.to_string(), value.to_string());
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Inline `style` attribute text, properties in name order.
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Drops every child carrying `class`. Returns whether anything was removed.
    pub fn remove_children_with_class(&mut self, class: &str) -> bool {
        let before = self.children.len();
        self.children.retain(|child| !child.has_class(class));
        before != self.children.len()
    }

    pub fn child_with_class(&self, class: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.has_class(class))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// Rendering collaborator: hands out the elements keyed by view id or element id.
///
/// A `None` means the element was never rendered; callers treat that as a no-op.
pub trait Surface {
    fn tab(&mut self, view: ViewId) -> Option<&mut Element>;
    fn container(&mut self, view: ViewId) -> Option<&mut Element>;
    fn element(&mut self, id: &str) -> Option<&mut Element>;
}

#[derive(Debug, Clone, Default)]
pub struct DomSurface {
    tabs: BTreeMap<ViewId, Element>,
    containers: BTreeMap<ViewId, Element>,
    elements: BTreeMap<String, Element>,
}

impl DomSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full page: shell chrome plus a tab and a container per registered view.
    pub fn build(registry: &ViewRegistry) -> Self {
        let mut surface = Self::new();
        surface.mount_shell();
        for descriptor in registry.iter() {
            surface.mount_view(&descriptor);
        }
        surface
    }

    /// Login affordance visible, everything that needs a session hidden.
    pub fn mount_shell(&mut self) {
        self.elements
            .insert(AUTH_SECTION.to_string(), Element::new(AUTH_SECTION));
        for id in [USER_INFO, TAB_NAVIGATION, APP_HEADER] {
            self.elements
                .insert(id.to_string(), Element::new(id).with_class(HIDDEN_CLASS));
        }
        for id in [USER_NAME, APP_TITLE] {
            self.elements.insert(id.to_string(), Element::new(id));
        }
    }

    pub fn mount_view(&mut self, descriptor: &ViewDescriptor) {
        let mut tab = Element::new(format!("tab{}", descriptor.id)).with_class("tab-btn");
        tab.text = descriptor.short_label.clone();
        for (property, value) in TAB_COMMON_STYLE {
            tab.set_style(property, value);
        }
        self.tabs.insert(descriptor.id, tab);

        let mut container =
            Element::new(format!("tabContent{}", descriptor.id)).with_class(HIDDEN_CLASS);
        container.text = descriptor.display_title();
        self.containers.insert(descriptor.id, container);
    }

    pub fn tabs(&self) -> impl Iterator<Item = (ViewId, &Element)> {
        self.tabs.iter().map(|(id, element)| (*id, element))
    }

    pub fn containers(&self) -> impl Iterator<Item = (ViewId, &Element)> {
        self.containers.iter().map(|(id, element)| (*id, element))
    }

    pub fn tab_ref(&self, view: ViewId) -> Option<&Element> {
        self.tabs.get(&view)
    }

    pub fn container_ref(&self, view: ViewId) -> Option<&Element> {
        self.containers.get(&view)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|element| !element.is_hidden())
    }

    pub fn visible_containers(&self) -> Vec<ViewId> {
        self.containers()
            .filter(|(_, element)| !element.is_hidden())
            .map(|(id, _)| id)
            .collect()
    }
}

impl Surface for DomSurface {
    fn tab(&mut self, view: ViewId) -> Option<&mut Element> {
        self.tabs.get_mut(&view)
    }

    fn container(&mut self, view: ViewId) -> Option<&mut Element> {
        self.containers.get_mut(&view)
    }

    fn element(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }
}
