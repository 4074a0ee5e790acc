//! Shared application state for the Scribe server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. The credential store and session manager are
//! owned here and passed explicitly — there are no module-level singletons.

use std::sync::Arc;

use scribe_core::credentials::CredentialStore;
use scribe_core::session::SessionManager;

use crate::config::PublicConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Operator credential lookup and bootstrap.
    pub credentials: CredentialStore,
    /// Session issue, validation, and revocation.
    pub sessions: Arc<SessionManager>,
    /// Origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Payload served at `GET /api/config`.
    pub public_config: PublicConfig,
    /// Session lifetime in seconds — used for the cookie `Max-Age`.
    pub session_ttl_secs: u64,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
