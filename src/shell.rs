use crate::auth::{AuthGate, AuthHook, AuthSession, IdentityError, LocalIdentity, SignInRequest};
use crate::badges::BadgeAnnotator;
use crate::config::Config;
use crate::models::{Preferences, ViewStatus};
use crate::registry::{RegistryError, ViewId, ViewRegistry};
use crate::storage::KeyValueStore;
use crate::surface::{DomSurface, Surface};
use crate::tabs::{SELECTION_KEY, TabConfig, TabController};
use std::sync::Arc;

pub type AppShell = Shell<DomSurface, Preferences>;

/// The page: one owned value holding selection, session and badges.
pub struct Shell<S, K> {
    tabs: TabController<S, K>,
    auth: AuthGate,
    badges: BadgeAnnotator,
}

impl<S: Surface, K: KeyValueStore> Shell<S, K> {
    pub fn new(tabs: TabController<S, K>, auth: AuthGate) -> Self {
        Self {
            tabs,
            auth,
            badges: BadgeAnnotator::new(),
        }
    }

    pub fn tabs(&self) -> &TabController<S, K> {
        &self.tabs
    }

    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    pub fn register_hook(&mut self, hook: Arc<dyn AuthHook>) {
        self.auth.register_hook(hook);
    }

    pub fn on_auth_transition(&mut self, session: Option<AuthSession>) {
        self.auth.on_auth_transition(session, &mut self.tabs);
    }

    pub fn sign_in(&mut self, request: SignInRequest) -> Result<AuthSession, IdentityError> {
        let session = self.auth.identity_mut().sign_in(request)?;
        self.on_auth_transition(Some(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&mut self) -> Result<(), IdentityError> {
        self.auth.identity_mut().sign_out()?;
        let session = self.auth.identity_mut().current();
        self.on_auth_transition(session);
        Ok(())
    }

    pub fn switch_to(&mut self, view: ViewId) {
        self.tabs.switch_to(view);
    }

    pub fn set_enabled(&mut self, view: ViewId, enabled: bool) {
        self.tabs.set_enabled(view, enabled);
    }

    pub fn set_badge(&mut self, view: ViewId, label: Option<&str>) {
        self.badges.set_badge(self.tabs.surface_mut(), view, label);
    }
}

impl AppShell {
    pub fn from_config(config: &Config, prefs: Preferences) -> Result<Self, RegistryError> {
        let registry = ViewRegistry::with_defaults(config.view_count)?;
        let surface = DomSurface::build(&registry);
        let tabs = TabController::new(
            registry,
            surface,
            prefs,
            TabConfig {
                default_view: config.default_view,
                storage_key: SELECTION_KEY.to_string(),
                app_version: config.app_version.clone(),
            },
        );

        let mut auth = AuthGate::new(LocalIdentity::default());
        for name in &config.auth_hooks {
            auth.expect_hook(name.clone());
        }

        Ok(Self::new(tabs, auth))
    }

    pub fn view_statuses(&self) -> Vec<ViewStatus> {
        let current = self.tabs.current();
        let surface = self.tabs.surface();
        self.tabs
            .registry()
            .iter()
            .map(|view| ViewStatus {
                active: current == Some(view.id),
                enabled: surface.tab_ref(view.id).is_none_or(|tab| !tab.disabled),
                badge: self.badges.badge(view.id).map(str::to_string),
                view,
            })
            .collect()
    }
}
