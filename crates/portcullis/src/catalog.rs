//! The catalogue of protected routes and their policies.

use portcullis_abac::Condition;
use portcullis_types::Role;
use serde::{Deserialize, Serialize};

use crate::policy::Policy;

/// Paths of the standard protected routes.
pub mod paths {
    pub const ADMIN: &str = "/admin";
    pub const HR: &str = "/hr";
    pub const FINANCE_MANAGER: &str = "/finance-manager";
    pub const IT_CLEARANCE_2: &str = "/it-clearance-2";
    pub const LEGAL_DIRECTOR: &str = "/legal-director";
    pub const OPS_COMBINED: &str = "/ops-combined";
    pub const EXEC_CLEARANCE_3: &str = "/exec-clearance-3";
}

/// A route path together with the policy that guards it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedRoute {
    pub path: String,
    pub policy: Policy,
}

/// Ordered, read-only set of protected routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteCatalog {
    routes: Vec<ProtectedRoute>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. A later route with the same path replaces the earlier
    /// one in place.
    pub fn with_route(mut self, path: impl Into<String>, policy: impl Into<Policy>) -> Self {
        let path = path.into();
        let policy = policy.into();
        match self.routes.iter_mut().find(|r| r.path == path) {
            Some(existing) => existing.policy = policy,
            None => self.routes.push(ProtectedRoute { path, policy }),
        }
        self
    }

    /// The protected routes served by Portcullis.
    ///
    /// Department names are compared exactly. `/it-clearance-2`,
    /// `/legal-director` and `/ops-combined` name departments no seed
    /// principal belongs to.
    pub fn standard() -> Self {
        use Condition::{
            And, ClearanceAtLeast, ClearanceEquals, DepartmentEquals, Or, RoleEquals,
            SeniorityAtLeast, SeniorityBelow,
        };

        Self::new()
            .with_route(paths::ADMIN, Policy::rbac([Role::Admin]))
            .with_route(paths::HR, DepartmentEquals("hr".into()))
            .with_route(
                paths::FINANCE_MANAGER,
                And(vec![
                    RoleEquals(Role::Manager),
                    DepartmentEquals("finance".into()),
                    SeniorityAtLeast(5),
                ]),
            )
            .with_route(
                paths::IT_CLEARANCE_2,
                And(vec![DepartmentEquals("IT".into()), ClearanceAtLeast(2)]),
            )
            .with_route(
                paths::LEGAL_DIRECTOR,
                And(vec![
                    RoleEquals(Role::Director),
                    DepartmentEquals("Legal".into()),
                    ClearanceEquals(3),
                ]),
            )
            .with_route(
                paths::OPS_COMBINED,
                And(vec![
                    RoleEquals(Role::Staff),
                    DepartmentEquals("Operations".into()),
                    ClearanceEquals(1),
                    SeniorityBelow(3),
                ]),
            )
            .with_route(
                paths::EXEC_CLEARANCE_3,
                And(vec![
                    Or(vec![RoleEquals(Role::Manager), RoleEquals(Role::Director)]),
                    ClearanceEquals(3),
                    SeniorityAtLeast(7),
                ]),
            )
    }

    pub fn policy_for(&self, path: &str) -> Option<&Policy> {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .map(|r| &r.policy)
    }

    pub fn routes(&self) -> impl Iterator<Item = &ProtectedRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
