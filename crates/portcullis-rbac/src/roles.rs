//! Role sets for RBAC checks.
//!
//! A [`RoleSet`] names the roles permitted on a resource. Roles carry no
//! hierarchy: an admin is not implicitly a manager, and a route that wants
//! both must list both.

use std::collections::BTreeSet;
use std::fmt;

use portcullis_types::Role;
use serde::{Deserialize, Serialize};

/// Set of roles permitted on a resource.
///
/// Backed by a `BTreeSet` so iteration and `Display` output are stable.
/// The empty set permits nobody.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Creates a set holding a single role.
    pub fn only(role: Role) -> Self {
        Self(BTreeSet::from([role]))
    }

    /// Adds a role. Builder style.
    pub fn with(mut self, role: Role) -> Self {
        self.0.insert(role);
        self
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = Role;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Role>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self(BTreeSet::from(roles))
    }
}

/// Renders as `{admin, manager}`.
impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, role) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{role}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = RoleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.to_string(), "{}");
        for role in Role::ALL {
            assert!(!set.contains(role));
        }
    }

    #[test]
    fn test_display_is_sorted() {
        let set = RoleSet::from([Role::Director, Role::Manager]);
        assert_eq!(set.to_string(), "{manager, director}");
    }

    #[test]
    fn test_builder_and_collect_agree() {
        let built = RoleSet::only(Role::Manager).with(Role::Director);
        let collected: RoleSet = [Role::Director, Role::Manager, Role::Manager]
            .into_iter()
            .collect();
        assert_eq!(built, collected);
        assert_eq!(built.len(), 2);
    }

    #[test]
    fn test_serde_as_list() {
        let set = RoleSet::from([Role::Admin, Role::Staff]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["admin","staff"]"#);

        let back: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
