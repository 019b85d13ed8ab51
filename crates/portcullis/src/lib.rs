//! # Portcullis
//!
//! Role- and attribute-based access control for web routes.
//!
//! A request is admitted in two steps:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ credentials  │ → │ PrincipalStore   │ → │ Enforcer         │
//! │ (form login) │   │ (who is this?)   │   │ (route policy?)  │
//! └──────────────┘   └──────────────────┘   └──────────────────┘
//! ```
//!
//! Each route in the [`RouteCatalog`] owns one [`Policy`]: an RBAC role set,
//! an ABAC [`Condition`], or an `AllOf`/`AnyOf` composition of those.
//!
//! # Quick Start
//!
//! ```
//! use portcullis::{Enforcer, RouteCatalog, paths};
//! use portcullis::{Principal, Role};
//!
//! let catalog = RouteCatalog::standard();
//! let enforcer = Enforcer::new().without_audit();
//!
//! let user3 = Principal::new("user3", Role::Manager, "finance", 2, 7);
//! let policy = catalog.policy_for(paths::FINANCE_MANAGER).unwrap();
//! assert!(enforcer.enforce(paths::FINANCE_MANAGER, &user3, policy).is_ok());
//! ```

mod catalog;
mod enforcer;
mod policy;

pub use catalog::{ProtectedRoute, RouteCatalog, paths};
pub use enforcer::{AccessDenied, Enforcer, Result};
pub use policy::Policy;

// Re-export the decision primitives
pub use portcullis_abac::{AttributePredicate, Condition, authorize_attributes};
pub use portcullis_rbac::{RoleSet, authorize_role};

// Re-export core types
pub use portcullis_types::{
    Clearance, Department, Effect, ParseRoleError, Principal, Role, Seniority, Username,
};

// Re-export the directory
pub use portcullis_directory::{
    Argon2Verifier, CredentialVerifier, DirectoryError, PrincipalStore,
};
