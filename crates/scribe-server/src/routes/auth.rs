//! Session routes: login, login status, logout.
//!
//! Login is the only place the credential store and password verifier are
//! consulted. Unknown usernames and wrong passwords produce the identical
//! generic failure body, so the API does not leak which usernames exist.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use scribe_core::password;

use crate::error::AppError;
use crate::middleware::{self, SessionContext, SESSION_COOKIE};
use crate::state::AppState;

/// Build the router for routes that work without a session.
pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/isLoggedIn", get(is_logged_in))
}

/// Build the router for session-protected auth routes.
pub fn session_router() -> Router<Arc<AppState>> {
    Router::new().route("/logout", post(logout))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Authenticate the operator and issue a session cookie.
///
/// Bad credentials — unknown username or wrong password alike — answer
/// 400 `{"message":"fail"}`. The success payload carries only the id and
/// username, never the stored hash.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let Some(row) = state.credentials.find_by_username(&body.username).await? else {
        return Ok(login_failure());
    };

    if !password::verify(&body.password, &row.password_hash)? {
        info!(username = %row.username, "login rejected");
        return Ok(login_failure());
    }

    let token = state.sessions.create(row.id, &row.username).await;
    let cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}",
        state.session_ttl_secs
    );

    info!(username = %row.username, "login succeeded");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({
            "message": "success",
            "data": LoginUser {
                id: row.id,
                username: row.username,
            },
        })),
    )
        .into_response())
}

fn login_failure() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": "fail" })),
    )
        .into_response()
}

/// Report whether the caller holds a live session.
///
/// Public route: an absent or expired session is `success: false`, not an
/// error. A live session slides forward by validating it here.
async fn is_logged_in(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<StatusResponse> {
    let success = match middleware::session_token(&headers) {
        Some(token) => state.sessions.validate(&token).await.is_some(),
        None => false,
    };

    Json(StatusResponse { success })
}

/// Destroy the caller's session and clear the cookie.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    state.sessions.destroy(&session.token).await;

    let cookie = format!("{SESSION_COOKIE}=; Path=/; Max-Age=0");

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(StatusResponse { success: true }),
    )
        .into_response()
}
