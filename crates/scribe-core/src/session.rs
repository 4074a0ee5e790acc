//! In-memory session manager.
//!
//! Sessions map an opaque token to a user identity and an expiry timestamp.
//! Tokens are UUID v4 (128 bits of OS CSPRNG randomness) and are carried
//! client-side in a cookie; the server stores them keyed by the full token
//! string but only ever logs a short prefix.
//!
//! Expiry is **sliding by design**: every successful [`SessionManager::validate`]
//! pushes the expiry forward by the configured TTL, so an active operator is
//! never logged out mid-edit. A session that has passed its expiry is
//! indistinguishable from one that never existed.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Identity and lifetime of one active session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Concurrent session table with a fixed TTL.
///
/// Safe under concurrent `create` / `validate` / `destroy` for different
/// tokens; operations on the same token serialize on the inner lock.
pub struct SessionManager {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionInfo>>,
}

impl SessionManager {
    /// Create a session manager whose sessions live for `ttl` past their
    /// most recent validation.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Issue a new session for `user_id`, returning the opaque token.
    ///
    /// Multiple live sessions per user are permitted.
    pub async fn create(&self, user_id: i64, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        let info = SessionInfo {
            user_id,
            username: username.to_owned(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.write().await.insert(token.clone(), info);

        info!(
            token_prefix = &token[..8],
            username, "session created"
        );
        token
    }

    /// Validate a token, returning its session if live.
    ///
    /// Returns `None` for unknown or expired tokens; expired entries are
    /// removed on the spot. A valid access slides the expiry forward by the
    /// full TTL (documented sliding-window behavior).
    pub async fn validate(&self, token: &str) -> Option<SessionInfo> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        match sessions.get_mut(token) {
            Some(info) if info.expires_at > now => {
                info.expires_at = now + self.ttl;
                Some(info.clone())
            }
            Some(_) => {
                sessions.remove(token);
                debug!(token_prefix = &token[..8.min(token.len())], "session expired");
                None
            }
            None => None,
        }
    }

    /// Destroy a session. Destroying an unknown token is not an error.
    pub async fn destroy(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            info!(token_prefix = &token[..8.min(token.len())], "session destroyed");
        }
    }

    /// Remove every expired session, returning how many were dropped.
    ///
    /// Called periodically by the server's sweep worker so abandoned
    /// sessions do not accumulate.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, info| info.expires_at > now);
        before - sessions.len()
    }

    /// Number of live (not yet purged) sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manager(ttl_secs: i64) -> SessionManager {
        SessionManager::new(Duration::seconds(ttl_secs))
    }

    #[tokio::test]
    async fn create_then_validate() {
        let mgr = manager(60);
        let token = mgr.create(1, "admin").await;

        let info = mgr.validate(&token).await.unwrap();
        assert_eq!(info.user_id, 1);
        assert_eq!(info.username, "admin");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let mgr = manager(60);
        assert!(mgr.validate("no-such-token").await.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_invalid_and_removed() {
        let mgr = manager(0);
        let token = mgr.create(1, "admin").await;

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert!(mgr.validate(&token).await.is_none());
        assert!(mgr.is_empty().await);
    }

    #[tokio::test]
    async fn validate_slides_expiry_forward() {
        let mgr = manager(60);
        let token = mgr.create(1, "admin").await;

        let first = mgr.validate(&token).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let second = mgr.validate(&token).await.unwrap();

        assert!(second.expires_at > first.expires_at);
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let mgr = manager(60);
        let token = mgr.create(1, "admin").await;

        mgr.destroy(&token).await;
        assert!(mgr.validate(&token).await.is_none());
        mgr.destroy(&token).await; // unknown token, still fine
    }

    #[tokio::test]
    async fn multiple_sessions_per_user() {
        let mgr = manager(60);
        let a = mgr.create(1, "admin").await;
        let b = mgr.create(1, "admin").await;

        assert_ne!(a, b);
        assert!(mgr.validate(&a).await.is_some());
        assert!(mgr.validate(&b).await.is_some());
    }

    #[tokio::test]
    async fn purge_drops_only_expired() {
        let expired = manager(0);
        expired.create(1, "admin").await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(expired.purge_expired().await, 1);

        let live = manager(60);
        live.create(1, "admin").await;
        assert_eq!(live.purge_expired().await, 0);
        assert_eq!(live.len().await, 1);
    }
}
