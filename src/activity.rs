use crate::auth::{AuthHook, AuthSession};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

pub const ACTIVITY_HOOK: &str = "activity";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRecord {
    pub display_name: String,
    pub email: String,
    pub at: DateTime<Local>,
}

/// Sign-in hook that remembers who signed in and when, newest last.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    records: Arc<Mutex<Vec<SignInRecord>>>,
}

impl ActivityLog {
    pub fn records(&self) -> Vec<SignInRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AuthHook for ActivityLog {
    fn name(&self) -> &str {
        ACTIVITY_HOOK
    }

    fn on_authenticated(&self, session: &AuthSession) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SignInRecord {
                display_name: session.display_name.clone(),
                email: session.email.clone(),
                at: Local::now(),
            });
    }
}
