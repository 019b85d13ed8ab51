//! CLI command implementations.

pub mod check;
pub mod matrix;
pub mod routes;
pub mod serve;

use portcullis::Principal;
use portcullis_directory::SEED_PRINCIPALS;

/// The built-in roster, without credentials.
pub(crate) fn roster() -> Vec<Principal> {
    SEED_PRINCIPALS.iter().map(|seed| seed.principal()).collect()
}
