//! Server configuration for Scribe.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `SCRIBE_*` environment variables.

use std::net::SocketAddr;

use serde::Serialize;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ScribeConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Path to the SQLite credential database.
    pub db_path: String,
    /// Username seeded into an empty credential store on first run.
    pub bootstrap_username: String,
    /// Password for the bootstrap credential. Required only when the store
    /// is empty; never read again afterwards.
    pub bootstrap_password: Option<String>,
    /// Session lifetime in seconds (sliding window).
    pub session_ttl_secs: u64,
    /// Seconds between expired-session sweeps.
    pub sweep_interval_secs: u64,
    /// Origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    /// Public subset served verbatim at `GET /api/config`.
    pub public: PublicConfig,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

/// The public configuration payload the GUI fetches before login.
#[derive(Debug, Clone, Serialize)]
pub struct PublicConfig {
    /// Base URL of this API, as the GUI should reach it.
    pub api: String,
    /// Directory the GUI offers for post editing.
    #[serde(rename = "postPath")]
    pub post_path: String,
    /// Site root the GUI passes to the build trigger.
    #[serde(rename = "rootPath")]
    pub root_path: String,
}

impl ScribeConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `SCRIBE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:3001`)
    /// - `SCRIBE_DB_PATH` — SQLite credential database (default: `./db/users.db`)
    /// - `SCRIBE_USERNAME` — bootstrap username (default: `admin`)
    /// - `SCRIBE_PASSWORD` — bootstrap password (required on first run only)
    /// - `SCRIBE_SESSION_TTL` — session lifetime in seconds (default: `60`)
    /// - `SCRIBE_SESSION_SWEEP_INTERVAL` — seconds between sweeps (default: `60`)
    /// - `SCRIBE_ALLOWED_ORIGINS` — comma-separated origin allow-list
    ///   (default: `http://localhost:3000`)
    /// - `SCRIBE_PUBLIC_API` / `SCRIBE_POST_PATH` / `SCRIBE_ROOT_PATH` — the
    ///   `GET /api/config` payload
    /// - `SCRIBE_LOG_LEVEL` — log filter (default: `info`)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: SCRIBE_BIND_ADDR > PORT > default 127.0.0.1:3001
        let bind_addr = if let Ok(addr) = std::env::var("SCRIBE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3001)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(3001);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 3001))
        };

        let db_path =
            std::env::var("SCRIBE_DB_PATH").unwrap_or_else(|_| "./db/users.db".to_owned());

        let bootstrap_username =
            std::env::var("SCRIBE_USERNAME").unwrap_or_else(|_| "admin".to_owned());
        let bootstrap_password = std::env::var("SCRIBE_PASSWORD").ok();

        let session_ttl_secs = std::env::var("SCRIBE_SESSION_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let sweep_interval_secs = std::env::var("SCRIBE_SESSION_SWEEP_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let allowed_origins = std::env::var("SCRIBE_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_owned())
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();

        let public = PublicConfig {
            api: std::env::var("SCRIBE_PUBLIC_API")
                .unwrap_or_else(|_| "http://localhost:3001/api".to_owned()),
            post_path: std::env::var("SCRIBE_POST_PATH")
                .unwrap_or_else(|_| "./content/posts".to_owned()),
            root_path: std::env::var("SCRIBE_ROOT_PATH").unwrap_or_else(|_| ".".to_owned()),
        };

        let log_level = std::env::var("SCRIBE_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Self {
            bind_addr,
            db_path,
            bootstrap_username,
            bootstrap_password,
            session_ttl_secs,
            sweep_interval_secs,
            allowed_origins,
            public,
            log_level,
        }
    }
}
