use crate::storage::KeyValueStore;
use crate::surface::{APP_HEADER, AUTH_SECTION, Surface, TAB_NAVIGATION, USER_INFO, USER_NAME};
use crate::tabs::TabController;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub signed_in: bool,
    pub display_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub display_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("display name must not be empty")]
    MissingDisplayName,
    #[error("no pending redirect sign-in")]
    NoRedirect,
}

/// Identity collaborator. The gate only consumes what it reports.
pub trait IdentityProvider {
    fn sign_in(&mut self, request: SignInRequest) -> Result<AuthSession, IdentityError>;
    fn sign_out(&mut self) -> Result<(), IdentityError>;
    fn current(&self) -> Option<AuthSession>;
    /// Outcome of a sign-in that completed through a redirect, if any.
    fn redirect_result(&mut self) -> Result<Option<AuthSession>, IdentityError>;
}

/// In-process identity used by the server: whoever posts a name is signed in.
#[derive(Debug, Default)]
pub struct LocalIdentity {
    session: Option<AuthSession>,
}

impl IdentityProvider for LocalIdentity {
    fn sign_in(&mut self, request: SignInRequest) -> Result<AuthSession, IdentityError> {
        let display_name = request.display_name.trim();
        if display_name.is_empty() {
            return Err(IdentityError::MissingDisplayName);
        }

        let session = AuthSession {
            signed_in: true,
            display_name: display_name.to_string(),
            email: request.email.trim().to_string(),
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&mut self) -> Result<(), IdentityError> {
        self.session = None;
        Ok(())
    }

    fn current(&self) -> Option<AuthSession> {
        self.session.clone()
    }

    fn redirect_result(&mut self) -> Result<Option<AuthSession>, IdentityError> {
        Err(IdentityError::NoRedirect)
    }
}

/// Work to run once a user is signed in, such as loading a view's data.
pub trait AuthHook: Send + Sync {
    fn name(&self) -> &str;
    fn on_authenticated(&self, session: &AuthSession);
}

/// Switches between the login view and the signed-in shell.
pub struct AuthGate {
    identity: Box<dyn IdentityProvider + Send>,
    expected_hooks: Vec<String>,
    hooks: BTreeMap<String, Arc<dyn AuthHook>>,
    session: Option<AuthSession>,
}

impl AuthGate {
    pub fn new(identity: impl IdentityProvider + Send + 'static) -> Self {
        Self {
            identity: Box::new(identity),
            expected_hooks: Vec::new(),
            hooks: BTreeMap::new(),
            session: None,
        }
    }

    /// Names a hook that should run on every sign-in, registered or not.
    pub fn expect_hook(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.expected_hooks.contains(&name) {
            self.expected_hooks.push(name);
        }
    }

    /// Registers a hook and expects it from now on.
    pub fn register_hook(&mut self, hook: Arc<dyn AuthHook>) {
        let name = hook.name().to_string();
        self.expect_hook(name.clone());
        self.hooks.insert(name, hook);
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn identity_mut(&mut self) -> &mut (dyn IdentityProvider + Send + 'static) {
        self.identity.as_mut()
    }

    pub fn on_auth_transition<S: Surface, K: KeyValueStore>(
        &mut self,
        session: Option<AuthSession>,
        tabs: &mut TabController<S, K>,
    ) {
        match session.filter(|session| session.signed_in) {
            Some(session) => self.reveal(session, tabs),
            None => self.conceal(tabs),
        }
    }

    fn reveal<S: Surface, K: KeyValueStore>(
        &mut self,
        session: AuthSession,
        tabs: &mut TabController<S, K>,
    ) {
        info!(user = %session.display_name, email = %session.email, "signed in");

        let surface = tabs.surface_mut();
        set_hidden(surface, AUTH_SECTION, true);
        for id in [USER_INFO, TAB_NAVIGATION, APP_HEADER] {
            set_hidden(surface, id, false);
        }
        if let Some(name) = surface.element(USER_NAME) {
            name.text = session.display_name.clone();
        }

        tabs.restore_or_default();

        for name in &self.expected_hooks {
            match self.hooks.get(name) {
                Some(hook) => {
                    debug!(hook = %name, "running sign-in hook");
                    hook.on_authenticated(&session);
                }
                None => warn!(hook = %name, "sign-in hook not registered"),
            }
        }

        self.session = Some(session);
    }

    fn conceal<S: Surface, K: KeyValueStore>(&mut self, tabs: &mut TabController<S, K>) {
        match self.identity.redirect_result() {
            Ok(Some(session)) => info!(user = %session.display_name, "redirect sign-in completed"),
            Ok(None) => {}
            // Expected on a first visit.
            Err(err) => debug!("redirect result unavailable: {err}"),
        }

        self.session = None;

        let surface = tabs.surface_mut();
        set_hidden(surface, AUTH_SECTION, false);
        for id in [USER_INFO, TAB_NAVIGATION, APP_HEADER] {
            set_hidden(surface, id, true);
        }
        info!("signed out");
    }
}

fn set_hidden(surface: &mut impl Surface, id: &str, hidden: bool) {
    match surface.element(id) {
        Some(element) => element.set_hidden(hidden),
        None => debug!(element = id, "shell element not rendered"),
    }
}
