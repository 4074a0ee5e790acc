//! Public configuration route: `GET /api/config`
//!
//! The GUI fetches this before login to learn where the API lives and which
//! paths to offer for editing and building. Only the public subset of the
//! configuration is exposed.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::config::PublicConfig;
use crate::state::AppState;

/// Build the public configuration router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/config", get(public_config))
}

async fn public_config(State(state): State<Arc<AppState>>) -> Json<PublicConfig> {
    Json(state.public_config.clone())
}
