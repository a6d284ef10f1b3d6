//! SQLite database handle and schema

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{info, warn};

use crate::domain::DomainError;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        username      TEXT    UNIQUE NOT NULL,
        password_hash TEXT    NOT NULL,
        wins          INTEGER NOT NULL DEFAULT 0,
        losses        INTEGER NOT NULL DEFAULT 0,
        streak        INTEGER NOT NULL DEFAULT 0
    )
"#;

/// Location of the SQLite file plus the options used for every connection
#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl SqliteDatabase {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection. Callers hand it back through [`release`](Self::release).
    pub async fn connect(&self) -> Result<SqliteConnection, DomainError> {
        self.options.connect().await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to open database '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Close a connection opened by [`connect`](Self::connect).
    ///
    /// A failed close does not fail the operation that already completed.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(path = %self.path.display(), error = %e, "Failed to close database connection");
        }
    }

    /// Create the users table if it does not exist yet
    pub async fn init_schema(&self) -> Result<(), DomainError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(CREATE_USERS_TABLE).execute(&mut conn).await;
        self.release(conn).await;

        result.map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        info!(path = %self.path.display(), "Database schema ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_schema_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battle.db");
        let database = SqliteDatabase::new(&path);

        database.init_schema().await.unwrap();

        assert!(path.exists());
        assert_eq!(database.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let database = SqliteDatabase::new(dir.path().join("battle.db"));

        database.init_schema().await.unwrap();
        database.init_schema().await.unwrap();

        let mut conn = database.connect().await.unwrap();
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'",
        )
        .fetch_one(&mut conn)
        .await
        .unwrap();
        database.release(conn).await;

        assert_eq!(tables, 1);
    }

    #[tokio::test]
    async fn test_connect_fails_for_unreachable_path() {
        let dir = tempfile::tempdir().unwrap();
        let database = SqliteDatabase::new(dir.path().join("missing").join("battle.db"));

        let result = database.connect().await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
