//! portcullis-directory: Principal lookup for `Portcullis`
//!
//! The directory holds the fixed roster of principals and answers one
//! question: given a username and a password, who is this? It is built once
//! at startup and is read-only afterwards, so it can be shared across
//! request handlers behind an `Arc` without locking.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use portcullis_directory::{Argon2Verifier, PrincipalStore};
//!
//! let store = PrincipalStore::seeded(Arc::new(Argon2Verifier::new())).unwrap();
//!
//! let principal = store.find_by_credentials("user3", "pass").unwrap();
//! assert_eq!(principal.department.as_str(), "finance");
//!
//! assert!(store.find_by_credentials("user3", "wrong").is_err());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use portcullis_types::{Principal, Username};
use tracing::debug;

mod credential;
pub mod seed;

pub use credential::{Argon2Verifier, CredentialVerifier, StoredCredential};
pub use seed::{SEED_PRINCIPALS, SeedPrincipal};

/// A principal paired with its stored credential.
#[derive(Debug, Clone)]
pub struct PrincipalRecord {
    principal: Principal,
    credential: StoredCredential,
}

impl PrincipalRecord {
    pub fn new(principal: Principal, credential: StoredCredential) -> Self {
        Self {
            principal,
            credential,
        }
    }

    /// Hashes `password` with `verifier` and pairs it with `principal`.
    pub fn with_password(
        principal: Principal,
        password: &str,
        verifier: &dyn CredentialVerifier,
    ) -> Result<Self, DirectoryError> {
        Ok(Self::new(principal, verifier.hash(password)?))
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

/// Read-only roster of principals.
///
/// Records keep their insertion order. Usernames are unique; building a
/// store with a repeated username fails.
pub struct PrincipalStore {
    records: Vec<PrincipalRecord>,
    verifier: Arc<dyn CredentialVerifier>,
    /// Verified against when no username matches, so unknown users cost the
    /// same hash work as wrong passwords.
    decoy: StoredCredential,
}

const DECOY_PASSWORD: &str = "portcullis-decoy-credential";

impl PrincipalStore {
    /// Builds a store from explicit records.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateUsername`] if two records share a
    /// username.
    pub fn from_records(
        records: Vec<PrincipalRecord>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.principal.username) {
                return Err(DirectoryError::DuplicateUsername(
                    record.principal.username.clone(),
                ));
            }
        }

        let decoy = verifier.hash(DECOY_PASSWORD)?;
        Ok(Self {
            records,
            verifier,
            decoy,
        })
    }

    /// Builds the store from the compiled-in roster in [`SEED_PRINCIPALS`].
    pub fn seeded(verifier: Arc<dyn CredentialVerifier>) -> Result<Self, DirectoryError> {
        let records = SEED_PRINCIPALS
            .iter()
            .map(|seed| PrincipalRecord::with_password(seed.principal(), seed.password, &*verifier))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records, verifier)
    }

    /// Authenticates a username/password pair.
    ///
    /// Username comparison is exact. The password is checked against the
    /// record whose username matches, or against a decoy credential when
    /// none does.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] when no record matches both
    /// fields. The error does not say which field was wrong.
    pub fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<&Principal, DirectoryError> {
        let record = self
            .records
            .iter()
            .find(|record| record.principal.username == username);

        let verified = match record {
            Some(record) => self
                .verifier
                .verify(password, &record.credential)
                .then_some(record),
            None => {
                self.verifier.verify(password, &self.decoy);
                None
            }
        };

        match verified {
            Some(record) => Ok(&record.principal),
            None => {
                debug!(username, "credential lookup failed");
                Err(DirectoryError::NotFound)
            }
        }
    }

    /// Looks up a principal by username without checking credentials.
    pub fn find_by_username(&self, username: &str) -> Option<&Principal> {
        self.records
            .iter()
            .map(|record| &record.principal)
            .find(|principal| principal.username == username)
    }

    /// Iterates principals in roster order.
    pub fn principals(&self) -> impl Iterator<Item = &Principal> {
        self.records.iter().map(PrincipalRecord::principal)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Debug for PrincipalStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrincipalStore")
            .field("principals", &self.records.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur during directory construction and lookup.
#[derive(thiserror::Error, Debug)]
pub enum DirectoryError {
    /// No principal matched the supplied credentials.
    #[error("invalid username or password")]
    NotFound,

    /// Two records share a username.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// Password hashing failed.
    #[error("credential hashing failed: {0}")]
    Hash(String),
}
