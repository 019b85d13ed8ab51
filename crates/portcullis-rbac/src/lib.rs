//! # portcullis-rbac: Role-Based Access Control
//!
//! The RBAC decision is a membership test: a principal is allowed exactly
//! when its role is in the resource's [`RoleSet`].
//!
//! ```
//! use portcullis_rbac::{RoleSet, authorize_role};
//! use portcullis_types::{Effect, Principal, Role};
//!
//! let admins = RoleSet::only(Role::Admin);
//! let alice = Principal::new("alice", Role::Admin, "HR", 3, 5);
//! let bob = Principal::new("bob", Role::Manager, "finance", 2, 7);
//!
//! assert_eq!(authorize_role(&alice, &admins), Effect::Allow);
//! assert_eq!(authorize_role(&bob, &admins), Effect::Deny);
//! ```
//!
//! Only the role participates. Department, clearance, and seniority are
//! ignored here; attribute checks live in `portcullis-abac`.

pub mod roles;

pub use roles::RoleSet;

use portcullis_types::{Effect, Principal};

/// Decides whether `principal`'s role is permitted by `allowed`.
pub fn authorize_role(principal: &Principal, allowed: &RoleSet) -> Effect {
    Effect::from_bool(allowed.contains(principal.role))
}
