//! Opening the gateway database: connection options, schema migrations and
//! the shared pool handed to the repositories.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// How long a connection waits on a lock held by another writer (for
/// example the network server sharing the file) before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the gateway database lives.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:gatewaycfg.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// A private in-memory database, shared by every connection of its pool.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
        }
    }

    /// Open the database and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is invalid, the file cannot be
    /// opened or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        Database::open(options).await
    }
}

/// An open gateway database with the legacy and gateway configuration
/// schemas applied.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(options: SqliteConnectOptions) -> Result<Self, StorageError> {
        let pool = SqlitePool::connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(
            connections = pool.size(),
            "gateway database open and migrated"
        );

        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for every pooled connection to finish and close it.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
