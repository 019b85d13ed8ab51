//! # portcullis-types: Core types for `Portcullis`
//!
//! This crate contains the shared vocabulary of the access-control workspace:
//! - Principal identity ([`Username`], [`Principal`])
//! - Principal attributes ([`Role`], [`Department`], [`Clearance`], [`Seniority`])
//! - Decisions ([`Effect`])
//!
//! Every type here is immutable once built and cheap to share. None of them
//! carries credential material; passwords live only in the directory crate.

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

// ============================================================================
// Identity
// ============================================================================

/// Unique login name of a principal.
///
/// Comparison is exact: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Username {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Username {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Username {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Role
// ============================================================================

/// Organisational role of a principal.
///
/// Roles are a closed set. They are compared by identity only; the derived
/// `Ord` exists so role sets iterate deterministically and carries no notion
/// of privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Individual contributor.
    Staff,
    /// Line manager.
    Manager,
    /// Head of a department.
    Director,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Staff, Role::Manager, Role::Director];

    /// Returns the canonical lowercase name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Manager => "manager",
            Role::Director => "director",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Parses exactly the canonical lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "manager" => Ok(Role::Manager),
            "director" => Ok(Role::Director),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Error returned when a string does not name a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected admin, staff, manager or director)")]
pub struct ParseRoleError(String);

// ============================================================================
// Department
// ============================================================================

/// Department a principal belongs to.
///
/// Equality is case-sensitive: `"hr"` and `"HR"` are different departments.
/// Callers that want case folding must ask for it with
/// [`Department::eq_ignore_ascii_case`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Department(String);

impl Department {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII case-insensitive comparison against a department name.
    pub fn eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Department {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Department {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// Ordered attributes
// ============================================================================

/// Security clearance level. Higher is more trusted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Clearance(u8);

impl Clearance {
    pub fn new(level: u8) -> Self {
        Self(level)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Display for Clearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Clearance {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<Clearance> for u8 {
    fn from(value: Clearance) -> Self {
        value.0
    }
}

/// Years of tenure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Seniority(u32);

impl Seniority {
    pub fn new(years: u32) -> Self {
        Self(years)
    }

    pub fn years(self) -> u32 {
        self.0
    }
}

impl Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Seniority {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Seniority> for u32 {
    fn from(value: Seniority) -> Self {
        value.0
    }
}

// ============================================================================
// Principal
// ============================================================================

/// An authenticated user, as seen by the decision engine.
///
/// A `Principal` only exists after authentication succeeded, so every
/// authorization entry point takes `&Principal` rather than an `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: Username,
    pub role: Role,
    pub department: Department,
    pub clearance: Clearance,
    pub seniority: Seniority,
}

impl Principal {
    pub fn new(
        username: impl Into<Username>,
        role: Role,
        department: impl Into<Department>,
        clearance: u8,
        seniority: u32,
    ) -> Self {
        Self {
            username: username.into(),
            role,
            department: department.into(),
            clearance: Clearance::new(clearance),
            seniority: Seniority::new(seniority),
        }
    }
}

// ============================================================================
// Effect
// ============================================================================

/// Outcome of an access decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// Grant access.
    Allow,
    /// Deny access.
    #[default]
    Deny,
}

impl Effect {
    /// Maps `true` to `Allow` and `false` to `Deny`.
    pub fn from_bool(allowed: bool) -> Self {
        if allowed { Effect::Allow } else { Effect::Deny }
    }

    pub fn is_allowed(self) -> bool {
        matches!(self, Effect::Allow)
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Allow => f.write_str("allow"),
            Effect::Deny => f.write_str("deny"),
        }
    }
}

impl From<bool> for Effect {
    fn from(allowed: bool) -> Self {
        Self::from_bool(allowed)
    }
}
