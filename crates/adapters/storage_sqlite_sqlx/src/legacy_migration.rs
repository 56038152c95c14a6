//! One-shot migration of the legacy channel configurations into gateway
//! configurations.
//!
//! For each legacy row a new gateway configuration is created with the
//! same channels and extra channels, then every `gateway` that referenced
//! the legacy row is pointed at the new configuration. Like the store, these
//! functions open no transaction; [`SqliteLegacyMigrator`](crate::SqliteLegacyMigrator)
//! wraps every row in its own.

use sqlx::SqliteConnection;

use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::id::{GatewayConfigurationId, LegacyChannelConfigurationId};
use gatewaycfg_domain::legacy::{LegacyChannelConfiguration, MigrationMapping};

use crate::error::StorageError;
use crate::{gateway_configuration, legacy};

const REPOINT_GATEWAYS: &str =
    "UPDATE gateway SET gateway_configuration_id = ? WHERE channel_configuration_id = ?";

/// Migrate a single legacy channel configuration.
///
/// Returns the id of the created gateway configuration.
///
/// # Errors
///
/// Returns [`GatewayCfgError::NotFound`] when the legacy row does not exist,
/// or the first error raised while reading, creating or repointing.
pub async fn migrate_channel_configuration(
    conn: &mut SqliteConnection,
    legacy_id: LegacyChannelConfigurationId,
) -> Result<GatewayConfigurationId, GatewayCfgError> {
    let legacy_config = legacy::get_channel_configuration(conn, legacy_id).await?;
    let extra_channels = legacy::get_extra_channels(conn, legacy_id).await?;

    let mut config = legacy_config.to_gateway_configuration(extra_channels);
    let id = gateway_configuration::create(conn, &mut config).await?;

    let repointed = sqlx::query(REPOINT_GATEWAYS)
        .bind(id.to_string())
        .bind(legacy_id.get())
        .execute(&mut *conn)
        .await
        .map_err(StorageError::from)?
        .rows_affected();

    tracing::debug!(
        legacy_id = %legacy_id,
        gateway_configuration_id = %id,
        gateways = repointed,
        "gateways repointed to migrated configuration"
    );

    Ok(id)
}

/// Migrate the listed row `legacy_config` and record it in `mapping`.
///
/// This is the per-row step shared by [`migrate_channel_configurations`] and
/// [`SqliteLegacyMigrator`](crate::SqliteLegacyMigrator), which differ only in
/// the connection they hand it.
pub(crate) async fn migrate_into_mapping(
    conn: &mut SqliteConnection,
    legacy_config: LegacyChannelConfiguration,
    mapping: &mut MigrationMapping,
) -> Result<GatewayConfigurationId, GatewayCfgError> {
    let id = migrate_channel_configuration(conn, legacy_config.id)
        .await
        .inspect_err(|err| {
            tracing::warn!(
                legacy_id = %legacy_config.id,
                error = %err,
                "legacy channel configuration not migrated"
            );
        })?;
    mapping.insert(id, legacy_config.name);

    Ok(id)
}

/// Migrate every legacy channel configuration on `conn`.
///
/// Stops at the first failure. Rows migrated before the failure stay
/// written unless the caller runs this inside a transaction it then drops.
///
/// # Errors
///
/// Returns the first error raised by [`migrate_channel_configuration`] or
/// by listing the legacy rows.
pub async fn migrate_channel_configurations(
    conn: &mut SqliteConnection,
) -> Result<MigrationMapping, GatewayCfgError> {
    let legacy_configs = legacy::list_channel_configurations(conn).await?;

    let mut mapping = MigrationMapping::with_capacity(legacy_configs.len());
    for legacy_config in legacy_configs {
        migrate_into_mapping(conn, legacy_config, &mut mapping).await?;
    }

    Ok(mapping)
}
