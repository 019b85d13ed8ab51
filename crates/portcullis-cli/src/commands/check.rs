//! Check command - evaluates one route for one built-in user.

use std::process::ExitCode;

use anyhow::{Result, anyhow};
use portcullis::{Effect, RouteCatalog};

use super::roster;
use crate::style::colors::SemanticStyle;
use crate::style::print_labeled;

pub fn run(user: &str, route: &str) -> Result<ExitCode> {
    let catalog = RouteCatalog::standard();
    let policy = catalog
        .policy_for(route)
        .ok_or_else(|| {
            anyhow!("Route '{route}' is not in the catalogue. Run 'portcullis routes'.")
        })?;

    let principal = roster()
        .into_iter()
        .find(|p| p.username == user)
        .ok_or_else(|| anyhow!("Unknown user '{user}'"))?;

    let effect = policy.evaluate(&principal);

    match effect {
        Effect::Allow => println!("{}", effect.success()),
        Effect::Deny => println!("{}", effect.error()),
    }
    print_labeled(
        "user",
        &format!(
            "{} ({}, {}, clearance {}, seniority {})",
            principal.username,
            principal.role,
            principal.department,
            principal.clearance,
            principal.seniority
        ),
    );
    print_labeled("route", route);
    print_labeled("policy", &policy.to_string());

    Ok(if effect.is_allowed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
