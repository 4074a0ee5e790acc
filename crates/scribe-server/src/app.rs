//! Router assembly.
//!
//! Split from `main` so integration tests can mount the exact production
//! router on a test server.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::middleware as axum_mw;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{origin_check, session_auth};
use crate::routes;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// Everything is mounted under `/api`. The origin check is the outermost
/// layer so a rejected origin never reaches a handler; the session gate
/// wraps only the protected routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .merge(routes::content::router())
        .merge(routes::build::router())
        .merge(routes::auth::session_router())
        .route_layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            session_auth,
        ));

    let api = Router::new()
        .merge(routes::site::router())
        .merge(routes::auth::public_router())
        .merge(protected);

    // CORS with credentials requires echoing an explicit origin, never a
    // wildcard — restrict to the configured allow-list.
    let origins: Vec<HeaderValue> = state
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            origin_check,
        ))
        .with_state(state)
}
