use crate::auth::AuthSession;
use crate::registry::{ViewDescriptor, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of the preferences file: the key-value store behind the shell.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub entries: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub view: ViewId,
}

#[derive(Debug, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct BadgeRequest {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub view: Option<ViewId>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ViewStatus {
    #[serde(flatten)]
    pub view: ViewDescriptor,
    pub active: bool,
    pub enabled: bool,
    pub badge: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub session: Option<AuthSession>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub login_visible: bool,
    pub shell_visible: bool,
    pub user_name: String,
    pub title: String,
    pub visible_views: Vec<ViewId>,
}
