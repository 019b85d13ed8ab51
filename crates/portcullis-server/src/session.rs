//! In-memory session table.
//!
//! A session maps a random id (the cookie value) to the username that
//! logged in. The principal itself is looked up from the directory on each
//! request, so a session never carries attributes or credentials.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use portcullis::Username;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Opaque session identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone)]
struct Session {
    username: Username,
    created_at: Instant,
}

/// Shared session table with a fixed time-to-live.
///
/// Cloning shares the underlying table.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Starts a session for `username` and returns its id.
    ///
    /// Expired sessions are dropped first, so abandoned logins do not
    /// accumulate between sweeps.
    pub fn create(&self, username: Username) -> SessionId {
        let id = SessionId::generate();
        let session = Session {
            username,
            created_at: Instant::now(),
        };
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, existing| existing.created_at.elapsed() < self.ttl);
        sessions.insert(id, session);
        id
    }

    /// Returns the username of a live session.
    ///
    /// An expired session is removed and resolves as absent.
    pub fn resolve(&self, id: SessionId) -> Option<Username> {
        {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            let session = sessions.get(&id)?;
            if session.created_at.elapsed() < self.ttl {
                return Some(session.username.clone());
            }
        }

        self.remove(id);
        None
    }

    /// Ends a session. Unknown ids are ignored.
    pub fn remove(&self, id: SessionId) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    /// Drops every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, session| session.created_at.elapsed() < self.ttl);
        before - sessions.len()
    }

    /// Spawns a task that calls [`purge_expired`](Self::purge_expired)
    /// every `period`. Must be called inside a tokio runtime.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let purged = store.purge_expired();
                if purged > 0 {
                    debug!(purged, remaining = store.len(), "expired sessions purged");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(Username::from("user3"));

        assert_eq!(store.resolve(id), Some(Username::from("user3")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.create(Username::from("user1"));
        let b = store.create(Username::from("user1"));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_ends_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(Username::from("user2"));

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert_eq!(store.resolve(id), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_session_is_absent_and_removed() {
        let store = SessionStore::new(Duration::ZERO);
        let id = store.create(Username::from("user4"));

        assert_eq!(store.resolve(id), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(Username::from("user5"));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.purge_expired(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_drops_expired_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        for _ in 0..50 {
            store.create(Username::from("user6"));
        }

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_keeps_live_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.create(Username::from("user5"));
        store.create(Username::from("user6"));

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_abandoned_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(Username::from("user7"));
        assert_eq!(store.len(), 1);

        let sweeper = store.spawn_sweeper(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        sweeper.abort();

        assert!(store.is_empty());
    }

    #[test]
    fn test_clone_shares_table() {
        let store = SessionStore::new(Duration::from_secs(60));
        let other = store.clone();
        let id = store.create(Username::from("user7"));

        assert_eq!(other.resolve(id), Some(Username::from("user7")));
    }

    #[test]
    fn test_session_id_round_trips_through_cookie_text() {
        let id = SessionId::generate();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }
}
