//! Credential store backed by SQLite.
//!
//! Holds the single operator credential (the schema permits more rows, but
//! nothing ever inserts a second one — there is no account-management flow).
//! The password column stores an Argon2id PHC string, never plaintext.
//! Username lookups are exact, case-sensitive matches; a uniqueness
//! constraint guarantees at most one row per username.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::error::CredentialError;
use crate::password;

/// A stored operator credential.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredential {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string. Never serialized into API responses.
    pub password_hash: String,
}

/// SQLite-backed credential store.
///
/// Opened once at startup; if the database cannot be opened or migrated the
/// error is fatal and the server must not serve traffic.
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    /// Open (creating if missing) the credential database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Storage`] if the file cannot be opened or
    /// the schema cannot be created.
    pub async fn open(path: &str) -> Result<Self, CredentialError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open an in-memory store. Used by tests.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Storage`] if the schema cannot be created.
    pub async fn open_in_memory() -> Result<Self, CredentialError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), CredentialError> {
        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Look up a credential by exact username.
    ///
    /// Absence is an ordinary `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Storage`] on query failure.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredential>, CredentialError> {
        let row = sqlx::query_as::<_, UserCredential>(
            "SELECT id, username, password_hash FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Whether the store holds no credentials yet.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Storage`] on query failure.
    pub async fn is_empty(&self) -> Result<bool, CredentialError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }

    /// Insert the bootstrap credential if the store is empty.
    ///
    /// Idempotent: if any row already exists this is a no-op and returns
    /// `false`. Otherwise the password is hashed and exactly one row is
    /// inserted, returning `true`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Storage`] on query failure, or
    /// [`CredentialError::Password`] if hashing fails.
    pub async fn bootstrap_if_empty(
        &self,
        username: &str,
        plaintext_password: &str,
    ) -> Result<bool, CredentialError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            return Ok(false);
        }

        let password_hash = password::hash(plaintext_password)?;

        sqlx::query("INSERT INTO users (username, password_hash) VALUES (?1, ?2)")
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        info!(username, "bootstrap credential created");
        Ok(true)
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_inserts_once() {
        let store = CredentialStore::open_in_memory().await.unwrap();
        assert!(store.bootstrap_if_empty("admin", "secret").await.unwrap());
        assert!(!store.bootstrap_if_empty("admin", "secret").await.unwrap());
    }

    #[tokio::test]
    async fn bootstrap_is_noop_for_different_username() {
        let store = CredentialStore::open_in_memory().await.unwrap();
        store.bootstrap_if_empty("admin", "secret").await.unwrap();
        assert!(!store.bootstrap_if_empty("other", "pw").await.unwrap());
        assert!(store.find_by_username("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lookup_is_exact_and_case_sensitive() {
        let store = CredentialStore::open_in_memory().await.unwrap();
        store.bootstrap_if_empty("admin", "secret").await.unwrap();

        let found = store.find_by_username("admin").await.unwrap();
        assert_eq!(found.unwrap().username, "admin");

        assert!(store.find_by_username("Admin").await.unwrap().is_none());
        assert!(store.find_by_username("admi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_hash_verifies_against_password() {
        let store = CredentialStore::open_in_memory().await.unwrap();
        store.bootstrap_if_empty("admin", "secret").await.unwrap();

        let row = store.find_by_username("admin").await.unwrap().unwrap();
        assert_ne!(row.password_hash, "secret");
        assert!(crate::password::verify("secret", &row.password_hash).unwrap());
    }
}
