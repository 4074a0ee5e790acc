//! Build route: trigger the static-site generator.
//!
//! Requires a session. Like the mutating content routes, the outcome is a
//! bare success flag: a build that cannot spawn and a build that exits
//! non-zero look the same to the caller. No timeout and no single-flight
//! guard — two concurrent triggers run the generator twice.

use std::path::Path;
use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use scribe_core::builder;

use crate::state::AppState;

/// Build the build-trigger router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/buildSite", post(build_site))
}

#[derive(Debug, Deserialize)]
pub struct BuildSiteRequest {
    /// Working directory for the generator (the site root).
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct OutcomeResponse {
    pub success: bool,
}

/// Run the site build synchronously and report the exit outcome.
async fn build_site(Json(body): Json<BuildSiteRequest>) -> Json<OutcomeResponse> {
    let success = match builder::run(Path::new(&body.path)).await {
        Ok(success) => success,
        Err(e) => {
            warn!(path = %body.path, error = %e, "build failed to start");
            false
        }
    };

    Json(OutcomeResponse { success })
}
