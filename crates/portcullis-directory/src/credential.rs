//! Credential hashing and verification.
//!
//! The directory never stores or compares plaintext passwords. Each record
//! carries a [`StoredCredential`] (an argon2id hash in PHC string format) and
//! a [`CredentialVerifier`] decides whether a presented password matches it.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::DirectoryError;

/// A hashed credential in PHC string format (`$argon2id$v=19$...`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredCredential(String);

impl StoredCredential {
    /// Wraps an already-hashed PHC string.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

// Hashes are not secrets, but they are not log material either.
impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredCredential(..)")
    }
}

/// Hashes and verifies passwords.
///
/// Implementations must be pure with respect to shared state so the
/// directory can be queried from many request handlers at once.
pub trait CredentialVerifier: Send + Sync {
    /// Produces a storable credential for `password`.
    fn hash(&self, password: &str) -> Result<StoredCredential, DirectoryError>;

    /// Returns `true` iff `password` matches `stored`.
    ///
    /// A malformed stored credential never verifies.
    fn verify(&self, password: &str, stored: &StoredCredential) -> bool;
}

/// Argon2id verifier with a fresh random salt per hashed credential.
#[derive(Clone)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl Argon2Verifier {
    /// Production parameters: argon2id, 19 MiB memory, 2 iterations, 1 lane.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Cheap parameters for test suites. Never use outside tests.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_tests() -> Self {
        use argon2::{Algorithm, Params, Version};

        let params = Params::new(1024, 1, 1, None).expect("valid argon2 test params");
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Argon2Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Verifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn hash(&self, password: &str) -> Result<StoredCredential, DirectoryError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DirectoryError::Hash(e.to_string()))?;
        Ok(StoredCredential(hash.to_string()))
    }

    fn verify(&self, password: &str, stored: &StoredCredential) -> bool {
        let parsed = match PasswordHash::new(stored.as_phc()) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored credential is not a valid PHC string");
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
