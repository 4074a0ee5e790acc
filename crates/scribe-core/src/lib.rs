//! Core library for Scribe.
//!
//! Contains the credential store, password verifier, session manager,
//! content repository, and build trigger. This crate knows nothing about
//! HTTP — `scribe-server` wires these pieces into request handlers.

pub mod builder;
pub mod content;
pub mod credentials;
pub mod error;
pub mod password;
pub mod session;
