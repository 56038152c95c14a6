//! Legacy migration service — runs the one-shot channel configuration
//! migration and reports what it produced.

use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::legacy::MigrationMapping;

use crate::ports::LegacyMigrator;

/// Application service wrapping a [`LegacyMigrator`].
pub struct LegacyMigrationService<M> {
    migrator: M,
}

impl<M: LegacyMigrator> LegacyMigrationService<M> {
    /// Create a new service backed by the given migrator.
    pub fn new(migrator: M) -> Self {
        Self { migrator }
    }

    /// Migrate every legacy channel configuration.
    ///
    /// Returns new gateway configuration id → legacy display name.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the migrator; the run stops there.
    pub async fn run(&self) -> Result<MigrationMapping, GatewayCfgError> {
        let mapping = self.migrator.migrate_all().await.inspect_err(|err| {
            tracing::error!(error = %err, "legacy channel configuration migration failed");
        })?;

        for (id, name) in &mapping {
            tracing::info!(
                gateway_configuration_id = %id,
                name = %name,
                "channel configuration migrated"
            );
        }
        tracing::info!(
            count = mapping.len(),
            "legacy channel configuration migration finished"
        );

        Ok(mapping)
    }
}
