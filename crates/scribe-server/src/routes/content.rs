//! Content routes: list, retrieve, save, and delete posts.
//!
//! All four require a live session (enforced by middleware before these
//! handlers run). Read routes surface `NotFound` to the caller; mutating
//! routes mask every failure into `{"success": false}` — the public
//! contract exposes *that* a write or delete failed, not why. The real
//! error is logged here so operators can still diagnose it.

use std::path::Path;
use std::sync::Arc;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use scribe_core::content;

use crate::error::AppError;
use crate::state::AppState;

/// Build the content router. Every route requires a session.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/listPosts", get(list_posts))
        .route("/retrievePost", get(retrieve_post))
        .route("/savePost", post(save_post))
        .route("/deletePost", post(delete_post))
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub file: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SavePostRequest {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub success: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Recursively list every file under the given directory.
async fn list_posts(Query(query): Query<PathQuery>) -> Result<Json<Vec<String>>, AppError> {
    let names = content::list(Path::new(&query.path)).await?;
    Ok(Json(names))
}

/// Read one post, with CRLF normalized to LF.
async fn retrieve_post(Query(query): Query<PathQuery>) -> Result<Json<PostResponse>, AppError> {
    let text = content::read(Path::new(&query.path)).await?;
    Ok(Json(PostResponse {
        file: query.path,
        content: text,
    }))
}

/// Create or overwrite a post in full.
async fn save_post(Json(body): Json<SavePostRequest>) -> Json<OutcomeResponse> {
    let success = match content::write(Path::new(&body.path), &body.content).await {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %body.path, error = %e, "save failed");
            false
        }
    };

    Json(OutcomeResponse { success })
}

/// Delete a post. A missing path is a failure, not a silent success.
async fn delete_post(Json(body): Json<DeletePostRequest>) -> Json<OutcomeResponse> {
    let success = match content::delete(Path::new(&body.path)).await {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %body.path, error = %e, "delete failed");
            false
        }
    };

    Json(OutcomeResponse { success })
}
