use crate::activity::ActivityLog;
use crate::shell::AppShell;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub shell: Arc<Mutex<AppShell>>,
    pub activity: ActivityLog,
}

impl AppState {
    pub fn new(data_path: PathBuf, mut shell: AppShell) -> Self {
        let activity = ActivityLog::default();
        shell.register_hook(Arc::new(activity.clone()));
        Self {
            data_path,
            shell: Arc::new(Mutex::new(shell)),
            activity,
        }
    }
}
