//! ABAC evaluation.
//!
//! Evaluation is pure: no I/O, no logging, no shared state. The same
//! principal and predicate always produce the same [`Effect`].

use portcullis_types::{Effect, Principal};

use crate::policy::Condition;

// ============================================================================
// Predicate trait
// ============================================================================

/// A pure predicate over a principal's attributes.
///
/// Implemented for [`Condition`] and for any `Fn(&Principal) -> bool`, so
/// callers can use the serializable condition language or an ad-hoc closure
/// interchangeably.
pub trait AttributePredicate {
    fn matches(&self, principal: &Principal) -> bool;
}

impl AttributePredicate for Condition {
    fn matches(&self, principal: &Principal) -> bool {
        evaluate_condition(self, principal)
    }
}

impl<F> AttributePredicate for F
where
    F: Fn(&Principal) -> bool,
{
    fn matches(&self, principal: &Principal) -> bool {
        self(principal)
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Decides whether `principal` satisfies `predicate`.
///
/// Allow iff the predicate returns `true`.
pub fn authorize_attributes<P>(principal: &Principal, predicate: &P) -> Effect
where
    P: AttributePredicate + ?Sized,
{
    Effect::from_bool(predicate.matches(principal))
}

// ============================================================================
// Condition Evaluation
// ============================================================================

/// Recursively evaluates a condition against the principal's attributes.
pub fn evaluate_condition(condition: &Condition, principal: &Principal) -> bool {
    match condition {
        Condition::RoleEquals(role) => principal.role == *role,

        Condition::DepartmentEquals(dept) => principal.department.as_str() == dept,
        Condition::DepartmentEqualsIgnoreCase(dept) => {
            principal.department.eq_ignore_ascii_case(dept)
        }

        Condition::ClearanceAtLeast(level) => principal.clearance.level() >= *level,
        Condition::ClearanceEquals(level) => principal.clearance.level() == *level,

        Condition::SeniorityAtLeast(years) => principal.seniority.years() >= *years,
        Condition::SeniorityBelow(years) => principal.seniority.years() < *years,

        // -- Logical combinators --
        Condition::And(sub) => sub.iter().all(|c| evaluate_condition(c, principal)),
        Condition::Or(sub) => sub.iter().any(|c| evaluate_condition(c, principal)),
        Condition::Not(inner) => !evaluate_condition(inner, principal),
    }
}
