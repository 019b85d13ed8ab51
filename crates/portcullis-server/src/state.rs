//! Shared state for Portcullis HTTP handlers.

use std::sync::Arc;
use std::time::Duration;

use portcullis::{Enforcer, PrincipalStore, RouteCatalog};
use portcullis_config::SessionConfig;

use crate::session::SessionStore;

/// Session cookie attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub secure: bool,
    pub max_age_secs: u64,
}

impl CookieSettings {
    /// `Set-Cookie` value that installs `value`.
    pub fn set(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value that clears the cookie.
    pub fn clear(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: u64) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax{secure}",
            self.name
        )
    }
}

/// Shared state for all Portcullis HTTP handlers.
///
/// Everything but the session table is immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Principal roster and credential verification.
    pub store: Arc<PrincipalStore>,

    /// Protected routes and their policies.
    pub catalog: Arc<RouteCatalog>,

    /// Live sessions.
    pub sessions: SessionStore,

    /// Policy enforcement with audit logging.
    pub enforcer: Enforcer,

    pub cookie: CookieSettings,
}

impl AppState {
    pub fn new(store: PrincipalStore, catalog: RouteCatalog, session: &SessionConfig) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            sessions: SessionStore::new(Duration::from_secs(session.ttl_secs)),
            enforcer: Enforcer::new(),
            cookie: CookieSettings {
                name: session.cookie_name.clone(),
                secure: session.secure_cookie,
                max_age_secs: session.ttl_secs,
            },
        }
    }

    /// Replaces the enforcer (e.g. one without audit logging).
    pub fn with_enforcer(mut self, enforcer: Enforcer) -> Self {
        self.enforcer = enforcer;
        self
    }
}
