//! Request-gating middleware: origin allow-list and session authentication.
//!
//! Both gates run before any handler. The origin check is outermost and
//! applies to every route; the session check wraps only the protected
//! routes and injects a [`SessionContext`] into request extensions for
//! downstream handlers.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "scribe.sid";

/// Authenticated session injected into request extensions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: i64,
    pub username: String,
    /// The raw token, needed by logout to destroy the session.
    pub token: String,
}

/// Reject cross-origin requests from origins outside the allow-list.
///
/// Requests without an `Origin` header (curl, same-origin navigation) pass
/// through. A mismatched origin is rejected before any handler or further
/// middleware runs — no file I/O happens for such requests.
pub async fn origin_check(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if let Some(origin) = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
    {
        if !state.allowed_origins.iter().any(|allowed| allowed == origin) {
            return AppError::OriginRejected.into_response();
        }
    }

    next.run(req).await
}

/// Extract the session token from the `Cookie` header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(SESSION_COOKIE)?
            .strip_prefix('=')
            .map(str::to_owned)
    })
}

/// Middleware that requires a live session.
///
/// Validates the cookie token against the session manager (sliding the
/// expiry forward on success) and injects [`SessionContext`]. An absent,
/// unknown, or expired token short-circuits with 401 — never a 5xx, and
/// the handler's side effect never runs.
pub async fn session_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = session_token(req.headers()) else {
        return AppError::Unauthenticated("missing session cookie".to_owned()).into_response();
    };

    match state.sessions.validate(&token).await {
        Some(info) => {
            req.extensions_mut().insert(SessionContext {
                user_id: info.user_id,
                username: info.username,
                token,
            });
            next.run(req).await
        }
        None => AppError::Unauthenticated("invalid or expired session".to_owned()).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_from_cookie_header() {
        let headers = headers_with_cookie("scribe.sid=abc123");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; scribe.sid=abc123; lang=en");
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert!(session_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn unrelated_cookies_yield_none() {
        let headers = headers_with_cookie("theme=dark; lang=en");
        assert!(session_token(&headers).is_none());
    }
}
