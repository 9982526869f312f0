use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub type ViewId = u32;

pub const DEFAULT_VIEW_COUNT: u32 = 16;

const PLACEHOLDER_TITLE: &str = "Not implemented";
const PLACEHOLDER_ICON: &str = "🔧";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    pub id: ViewId,
    pub title: String,
    pub short_label: String,
    pub icon: String,
}

impl ViewDescriptor {
    pub fn new(
        id: ViewId,
        title: impl Into<String>,
        short_label: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            short_label: short_label.into(),
            icon: icon.into(),
        }
    }

    fn placeholder(id: ViewId) -> Self {
        Self::new(id, PLACEHOLDER_TITLE, format!("xx{id}"), PLACEHOLDER_ICON)
    }

    pub fn display_title(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("view {0} is registered twice")]
    DuplicateView(ViewId),
    #[error("view {id} is outside 1..={count}")]
    OutOfRange { id: ViewId, count: u32 },
    #[error("view count must be at least 1")]
    Empty,
}

/// Static table of the views the shell knows how to show.
///
/// Ids run from 1 to `count`. Ids inside that range without an explicit entry,
/// and ids outside it, describe as a placeholder rather than failing.
#[derive(Debug, Clone)]
pub struct ViewRegistry {
    count: u32,
    views: BTreeMap<ViewId, ViewDescriptor>,
}

impl ViewRegistry {
    pub fn new(
        count: u32,
        descriptors: impl IntoIterator<Item = ViewDescriptor>,
    ) -> Result<Self, RegistryError> {
        if count == 0 {
            return Err(RegistryError::Empty);
        }

        let mut views = BTreeMap::new();
        for descriptor in descriptors {
            let id = descriptor.id;
            if id == 0 || id > count {
                return Err(RegistryError::OutOfRange { id, count });
            }
            if views.insert(id, descriptor).is_some() {
                return Err(RegistryError::DuplicateView(id));
            }
        }

        Ok(Self { count, views })
    }

    /// The tracker's own view table, sized to `count`.
    ///
    /// Entries past `count` are dropped so a smaller shell still builds.
    pub fn with_defaults(count: u32) -> Result<Self, RegistryError> {
        let named = [
            ViewDescriptor::new(1, "Weight Tracker", "Weight", "📊"),
            ViewDescriptor::new(2, "Sleep Tracker", "Sleep", "🛏️"),
            ViewDescriptor::new(3, "Room Cleaning", "Room Cleaning", "🏠"),
            ViewDescriptor::new(4, "Stretch", "Stretch", "🤸"),
            ViewDescriptor::new(5, "Dashboard", "Dashboard", "📊"),
            ViewDescriptor::new(8, "Memo List", "Memo List", "📝"),
        ];
        let named_ids: Vec<ViewId> = named.iter().map(|view| view.id).collect();
        let spare = (1..=count)
            .filter(|id| !named_ids.contains(id))
            .map(|id| ViewDescriptor::new(id, format!("xx{id}"), format!("xx{id}"), PLACEHOLDER_ICON));

        Self::new(
            count,
            named.into_iter().filter(|view| view.id <= count).chain(spare),
        )
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn contains(&self, id: ViewId) -> bool {
        (1..=self.count).contains(&id)
    }

    pub fn describe(&self, id: ViewId) -> ViewDescriptor {
        self.views
            .get(&id)
            .filter(|_| self.contains(id))
            .cloned()
            .unwrap_or_else(|| ViewDescriptor::placeholder(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = ViewDescriptor> + '_ {
        (1..=self.count).map(|id| self.describe(id))
    }
}
