//! Composed route policies.

use std::fmt;

use portcullis_abac::{Condition, authorize_attributes};
use portcullis_rbac::{RoleSet, authorize_role};
use portcullis_types::{Effect, Principal};
use serde::{Deserialize, Serialize};

/// The access rule guarding one route.
///
/// Serialized adjacently tagged, e.g.
/// `{"kind":"rbac","rule":["admin"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum Policy {
    /// Allow iff the principal's role is in the set.
    Rbac(RoleSet),
    /// Allow iff the condition holds for the principal.
    Abac(Condition),
    /// Allow iff every sub-policy allows. Empty allows.
    AllOf(Vec<Policy>),
    /// Allow iff some sub-policy allows. Empty denies.
    AnyOf(Vec<Policy>),
}

impl Policy {
    /// Evaluates the policy. Pure; never logs.
    pub fn evaluate(&self, principal: &Principal) -> Effect {
        match self {
            Policy::Rbac(roles) => authorize_role(principal, roles),
            Policy::Abac(condition) => authorize_attributes(principal, condition),
            Policy::AllOf(policies) => Effect::from_bool(
                policies
                    .iter()
                    .all(|p| p.evaluate(principal).is_allowed()),
            ),
            Policy::AnyOf(policies) => Effect::from_bool(
                policies
                    .iter()
                    .any(|p| p.evaluate(principal).is_allowed()),
            ),
        }
    }

    pub fn rbac(roles: impl Into<RoleSet>) -> Self {
        Policy::Rbac(roles.into())
    }

    pub fn abac(condition: Condition) -> Self {
        Policy::Abac(condition)
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::AllOf(sub) | Policy::AnyOf(sub) if sub.len() > 1 => write!(f, "({self})"),
            Policy::Abac(Condition::And(sub) | Condition::Or(sub)) if sub.len() > 1 => {
                write!(f, "({self})")
            }
            _ => write!(f, "{self}"),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Rbac(roles) => write!(f, "role in {roles}"),
            Policy::Abac(condition) => write!(f, "{condition}"),
            Policy::AllOf(sub) => fmt_joined(f, sub, " && ", "true"),
            Policy::AnyOf(sub) => fmt_joined(f, sub, " || ", "false"),
        }
    }
}

fn fmt_joined(
    f: &mut fmt::Formatter<'_>,
    sub: &[Policy],
    separator: &str,
    empty: &str,
) -> fmt::Result {
    if sub.is_empty() {
        return f.write_str(empty);
    }
    for (i, policy) in sub.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        policy.fmt_operand(f)?;
    }
    Ok(())
}

impl From<RoleSet> for Policy {
    fn from(roles: RoleSet) -> Self {
        Policy::Rbac(roles)
    }
}

impl From<Condition> for Policy {
    fn from(condition: Condition) -> Self {
        Policy::Abac(condition)
    }
}
