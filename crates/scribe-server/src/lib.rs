//! Scribe HTTP server.
//!
//! Wires the core library into an Axum JSON API mounted under `/api`:
//! origin allow-list and session-cookie middleware in front of the content,
//! build, and session routes.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
