pub mod activity;
pub mod app;
pub mod auth;
pub mod badges;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod shell;
pub mod state;
pub mod storage;
pub mod surface;
pub mod tabs;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use shell::{AppShell, Shell};
pub use state::AppState;
pub use storage::load_preferences;
