//! Scribe server entry point.
//!
//! Opens the credential store, seeds the bootstrap credential on first run,
//! then starts the Axum HTTP server with graceful shutdown. A background
//! sweep worker purges expired sessions and is cancelled on shutdown.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info};

use scribe_core::credentials::CredentialStore;
use scribe_core::session::SessionManager;

use scribe_server::app::build_router;
use scribe_server::config::ScribeConfig;
use scribe_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ScribeConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(db = %config.db_path, "scribe starting");

    let state = build_app_state(&config).await?;

    // Shutdown signal channel.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Spawn the expired-session sweep worker.
    let sweep_handle = {
        let sessions = Arc::clone(&state.sessions);
        let mut rx = shutdown_rx.clone();
        let interval_secs = config.sweep_interval_secs;
        tokio::spawn(async move {
            session_sweep_worker(sessions, &mut rx, interval_secs).await;
        })
    };

    let app = build_router(Arc::clone(&state));

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "scribe server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await
        .context("server error")?;

    // Wait for the sweep worker to finish (with timeout).
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;

    info!("scribe server stopped");
    Ok(())
}

/// Build the shared application state.
///
/// Opening or migrating the credential store is fatal here — the server
/// never serves traffic without it.
async fn build_app_state(config: &ScribeConfig) -> anyhow::Result<Arc<AppState>> {
    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let credentials = CredentialStore::open(&config.db_path)
        .await
        .context("failed to open credential store")?;

    if credentials
        .is_empty()
        .await
        .context("failed to query credential store")?
    {
        let password = config
            .bootstrap_password
            .as_deref()
            .context("credential store is empty and SCRIBE_PASSWORD is not set")?;

        credentials
            .bootstrap_if_empty(&config.bootstrap_username, password)
            .await
            .context("failed to bootstrap credential")?;
    }

    let ttl = chrono::Duration::seconds(i64::try_from(config.session_ttl_secs).unwrap_or(60));
    let sessions = Arc::new(SessionManager::new(ttl));

    Ok(Arc::new(AppState {
        credentials,
        sessions,
        allowed_origins: config.allowed_origins.clone(),
        public_config: config.public.clone(),
        session_ttl_secs: config.session_ttl_secs,
    }))
}

/// Background worker that periodically purges expired sessions.
async fn session_sweep_worker(
    sessions: Arc<SessionManager>,
    shutdown: &mut watch::Receiver<bool>,
    interval_secs: u64,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    info!(interval_secs, "session sweep worker started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "expired sessions purged");
                }
            }
            _ = shutdown.changed() => {
                info!("session sweep worker shutting down");
                return;
            }
        }
    }
}

/// Wait for SIGINT or SIGTERM, then broadcast shutdown.
async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
    let _ = shutdown_tx.send(true);
}
