//! ABAC condition language.
//!
//! A [`Condition`] is a serializable predicate over a principal's
//! attributes. Leaf conditions compare one attribute; `And`, `Or`, and `Not`
//! combine them.

use std::fmt;

use portcullis_types::Role;
use serde::{Deserialize, Serialize};

// ============================================================================
// Condition
// ============================================================================

/// A predicate over principal attributes.
///
/// String comparisons are exact unless the variant says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    // -- Role --
    /// Principal's role must equal the specified role.
    RoleEquals(Role),

    // -- Department --
    /// Principal's department must equal the specified value byte for byte.
    DepartmentEquals(String),
    /// Principal's department must equal the specified value, ignoring
    /// ASCII case.
    DepartmentEqualsIgnoreCase(String),

    // -- Clearance --
    /// Principal's clearance must be >= the specified level.
    ClearanceAtLeast(u8),
    /// Principal's clearance must equal the specified level.
    ClearanceEquals(u8),

    // -- Seniority --
    /// Principal's seniority must be >= the specified years.
    SeniorityAtLeast(u32),
    /// Principal's seniority must be strictly below the specified years.
    SeniorityBelow(u32),

    // -- Logical combinators --
    /// All sub-conditions must be true. Empty is true.
    And(Vec<Condition>),
    /// At least one sub-condition must be true. Empty is false.
    Or(Vec<Condition>),
    /// The sub-condition must be false.
    Not(Box<Condition>),
}

impl Condition {
    /// Negates `condition`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    fn is_compound(&self) -> bool {
        match self {
            Condition::And(sub) | Condition::Or(sub) => sub.len() > 1,
            _ => false,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Renders rule text such as `role == manager && seniority >= 5`.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::RoleEquals(role) => write!(f, "role == {role}"),
            Condition::DepartmentEquals(dept) => write!(f, "department == {dept:?}"),
            Condition::DepartmentEqualsIgnoreCase(dept) => {
                write!(f, "department ~= {dept:?}")
            }
            Condition::ClearanceAtLeast(level) => write!(f, "clearance >= {level}"),
            Condition::ClearanceEquals(level) => write!(f, "clearance == {level}"),
            Condition::SeniorityAtLeast(years) => write!(f, "seniority >= {years}"),
            Condition::SeniorityBelow(years) => write!(f, "seniority < {years}"),
            Condition::And(sub) => fmt_joined(f, sub, " && ", "true"),
            Condition::Or(sub) => fmt_joined(f, sub, " || ", "false"),
            Condition::Not(inner) => write!(f, "!({inner})"),
        }
    }
}

fn fmt_joined(
    f: &mut fmt::Formatter<'_>,
    sub: &[Condition],
    separator: &str,
    empty: &str,
) -> fmt::Result {
    if sub.is_empty() {
        return f.write_str(empty);
    }
    for (i, condition) in sub.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        condition.fmt_operand(f)?;
    }
    Ok(())
}
