//! `SQLite` implementation of [`LegacyMigrator`].

use sqlx::SqlitePool;

use gatewaycfg_app::ports::LegacyMigrator;
use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::legacy::MigrationMapping;

use crate::error::StorageError;
use crate::{legacy, legacy_migration};

/// `SQLite`-backed legacy migrator.
///
/// Every legacy row is migrated in its own transaction: a failing row is
/// rolled back and aborts the run, rows committed before it stay migrated.
pub struct SqliteLegacyMigrator {
    pool: SqlitePool,
}

impl SqliteLegacyMigrator {
    /// Create a new migrator using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LegacyMigrator for SqliteLegacyMigrator {
    async fn migrate_all(&self) -> Result<MigrationMapping, GatewayCfgError> {
        let legacy_configs = {
            let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
            legacy::list_channel_configurations(&mut conn).await?
        };

        let mut mapping = MigrationMapping::with_capacity(legacy_configs.len());
        for legacy_config in legacy_configs {
            let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
            legacy_migration::migrate_into_mapping(&mut tx, legacy_config, &mut mapping).await?;
            tx.commit().await.map_err(StorageError::from)?;
        }

        Ok(mapping)
    }
}
