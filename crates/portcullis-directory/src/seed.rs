//! Built-in principal roster.
//!
//! The roster is compiled in and loaded once at startup. Department names
//! are kept exactly as issued, including their inconsistent casing
//! (`"HR"` for user1, `"hr"` for user4 and user5).

use portcullis_types::{Principal, Role};

/// One roster entry before its password is hashed.
#[derive(Debug, Clone, Copy)]
pub struct SeedPrincipal {
    pub username: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub department: &'static str,
    pub clearance: u8,
    pub seniority: u32,
}

impl SeedPrincipal {
    pub fn principal(&self) -> Principal {
        Principal::new(
            self.username,
            self.role,
            self.department,
            self.clearance,
            self.seniority,
        )
    }
}

pub const SEED_PRINCIPALS: [SeedPrincipal; 7] = [
    SeedPrincipal {
        username: "user1",
        password: "pass",
        role: Role::Admin,
        department: "HR",
        clearance: 3,
        seniority: 5,
    },
    SeedPrincipal {
        username: "user2",
        password: "pass",
        role: Role::Staff,
        department: "finance",
        clearance: 1,
        seniority: 2,
    },
    SeedPrincipal {
        username: "user3",
        password: "pass",
        role: Role::Manager,
        department: "finance",
        clearance: 2,
        seniority: 7,
    },
    SeedPrincipal {
        username: "user4",
        password: "pass",
        role: Role::Staff,
        department: "hr",
        clearance: 1,
        seniority: 3,
    },
    SeedPrincipal {
        username: "user5",
        password: "pass",
        role: Role::Manager,
        department: "hr",
        clearance: 2,
        seniority: 8,
    },
    SeedPrincipal {
        username: "user6",
        password: "pass",
        role: Role::Staff,
        department: "marketing",
        clearance: 1,
        seniority: 1,
    },
    SeedPrincipal {
        username: "user7",
        password: "pass",
        role: Role::Manager,
        department: "marketing",
        clearance: 2,
        seniority: 4,
    },
];
