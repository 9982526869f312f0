use crate::registry::{DEFAULT_VIEW_COUNT, ViewId};
use std::env;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/preferences.json";
const DEFAULT_APP_VERSION: &str = "v2.15";
const DEFAULT_AUTH_HOOKS: &str = "activity";

/// Everything the process needs, read once at startup and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub view_count: u32,
    pub default_view: ViewId,
    pub app_version: String,
    pub auth_hooks: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let mut view_count = parse_or(&lookup, "SHELL_VIEW_COUNT", DEFAULT_VIEW_COUNT);
        if view_count == 0 {
            warn!("SHELL_VIEW_COUNT must be positive, using {DEFAULT_VIEW_COUNT}");
            view_count = DEFAULT_VIEW_COUNT;
        }

        let mut default_view = parse_or(&lookup, "SHELL_DEFAULT_VIEW", 1);
        if default_view == 0 || default_view > view_count {
            warn!(default_view, "SHELL_DEFAULT_VIEW outside 1..={view_count}, using 1");
            default_view = 1;
        }

        let app_version =
            lookup("SHELL_APP_VERSION").unwrap_or_else(|| DEFAULT_APP_VERSION.to_string());
        let auth_hooks = lookup("SHELL_AUTH_HOOKS")
            .unwrap_or_else(|| DEFAULT_AUTH_HOOKS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            port,
            data_path,
            view_count,
            default_view,
            app_version,
            auth_hooks,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring unparseable {key}={value:?}");
            default
        }),
        None => default,
    }
}
