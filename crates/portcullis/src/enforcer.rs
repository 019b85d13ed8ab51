//! Policy enforcement with audit logging.
//!
//! The decision primitives are pure. This is where a decision becomes a
//! `Result` and leaves a trace in the log.

use portcullis_types::{Principal, Role, Username};
use thiserror::Error;
use tracing::{info, warn};

use crate::policy::Policy;

/// A policy denied the principal access to a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access to '{route}' denied for {username} ({role})")]
pub struct AccessDenied {
    pub route: String,
    pub username: Username,
    pub role: Role,
}

/// Result type for enforcement.
pub type Result<T> = std::result::Result<T, AccessDenied>;

/// Evaluates route policies and audits each decision.
#[derive(Debug, Clone, Copy)]
pub struct Enforcer {
    /// Whether to log access decisions.
    audit_enabled: bool,
}

impl Enforcer {
    pub fn new() -> Self {
        Self {
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Enforces `policy` for `principal` on `route`.
    ///
    /// **Audit:** logs grants at `info` and denials at `warn`.
    pub fn enforce(&self, route: &str, principal: &Principal, policy: &Policy) -> Result<()> {
        let allowed = policy.evaluate(principal).is_allowed();

        if self.audit_enabled {
            if allowed {
                info!(
                    route = %route,
                    username = %principal.username,
                    role = %principal.role,
                    policy = %policy,
                    "Route access granted"
                );
            } else {
                warn!(
                    route = %route,
                    username = %principal.username,
                    role = %principal.role,
                    policy = %policy,
                    "Route access denied"
                );
            }
        }

        if allowed {
            Ok(())
        } else {
            Err(AccessDenied {
                route: route.to_string(),
                username: principal.username.clone(),
                role: principal.role,
            })
        }
    }
}

impl Default for Enforcer {
    fn default() -> Self {
        Self::new()
    }
}
