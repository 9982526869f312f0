use crate::registry::ViewId;
use crate::surface::{Element, Surface};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const BADGE_CLASS: &str = "tab-badge";

const BADGE_STYLE: [(&str, &str); 11] = [
    ("position", "absolute"),
    ("top", "-5px"),
    ("right", "-5px"),
    ("background", "#ff4757"),
    ("color", "white"),
    ("border-radius", "50%"),
    ("padding", "2px 6px"),
    ("font-size", "10px"),
    ("font-weight", "bold"),
    ("min-width", "16px"),
    ("text-align", "center"),
];

/// Unread markers on tab affordances. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct BadgeAnnotator {
    labels: BTreeMap<ViewId, String>,
}

impl BadgeAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn badge(&self, view: ViewId) -> Option<&str> {
        self.labels.get(&view).map(String::as_str)
    }

    /// Replaces the marker on `view`'s tab; `None` or a blank label removes it.
    pub fn set_badge(&mut self, surface: &mut impl Surface, view: ViewId, label: Option<&str>) {
        let Some(tab) = surface.tab(view) else {
            debug!(view, "no tab rendered for badge");
            return;
        };

        tab.remove_children_with_class(BADGE_CLASS);

        match label.map(str::trim).filter(|label| !label.is_empty()) {
            Some(label) => {
                let mut marker = Element::new(format!("tab{view}Badge")).with_class(BADGE_CLASS);
                marker.text = label.to_string();
                for (property, value) in BADGE_STYLE {
                    marker.set_style(property, value);
                }
                tab.set_style("position", "relative");
                tab.append_child(marker);
                self.labels.insert(view, label.to_string());
                info!(view, badge = label, "badge set");
            }
            None => {
                self.labels.remove(&view);
                info!(view, "badge cleared");
            }
        }
    }
}
