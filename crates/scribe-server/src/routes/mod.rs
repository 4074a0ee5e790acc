//! HTTP route handlers, grouped by concern.

pub mod auth;
pub mod build;
pub mod content;
pub mod site;
