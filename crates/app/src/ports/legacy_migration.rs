//! Legacy migration port — one-shot conversion of the legacy channel
//! configurations into gateway configurations.

use std::future::Future;

use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::legacy::MigrationMapping;

/// Rewrites every legacy channel configuration into a gateway configuration
/// and repoints the gateways that referenced it.
pub trait LegacyMigrator {
    /// Migrate every legacy row, stopping at the first failure.
    ///
    /// Returns new configuration id → legacy display name.
    fn migrate_all(&self) -> impl Future<Output = Result<MigrationMapping, GatewayCfgError>> + Send;
}
