//! Error types for `scribe-core`.
//!
//! Each subsystem has its own error enum. Variants carry enough context to
//! diagnose the problem from a log line — path, username, or operation —
//! but never plaintext passwords or session tokens.

/// Errors from password hashing and verification.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hashing or hash parsing failed (malformed PHC string, parameter error).
    #[error("password hashing failed: {reason}")]
    Hash { reason: String },
}

/// Errors from the credential store.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The underlying SQLite database is unavailable or a query failed.
    /// At startup this is fatal — the server refuses to serve traffic.
    #[error("credential storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Hashing the bootstrap password failed.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Errors from the content repository.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The path does not exist.
    #[error("path not found: {path}")]
    NotFound { path: String },

    /// The path exists but is a file where a directory was required.
    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    /// Any other filesystem failure (permissions, disk full, missing parent).
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    /// Classify an `io::Error` for `path`, mapping missing-file errors to
    /// [`ContentError::NotFound`].
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Errors from the build trigger.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The build command could not be spawned (missing binary, bad working
    /// directory). A command that spawns but exits non-zero is not an error
    /// here — that is an unsuccessful build, reported as `false`.
    #[error("failed to spawn build command: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}
