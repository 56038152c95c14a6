//! Storage port — repository trait for gateway configurations.

use std::future::Future;

use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::gateway_configuration::GatewayConfiguration;
use gatewaycfg_domain::id::GatewayConfigurationId;

/// Repository for persisting [`GatewayConfiguration`]s together with their
/// extra channels.
///
/// Every call is a complete composite write: implementations must never
/// leave extra channels out of sync with their parent.
pub trait GatewayConfigurationRepository {
    /// Persist a new configuration, assigning an id when it has none.
    ///
    /// Returns the configuration with its id and timestamps populated.
    fn create(
        &self,
        config: GatewayConfiguration,
    ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send;

    /// Get a configuration and its extra channels, or
    /// [`GatewayCfgError::NotFound`].
    fn get_by_id(
        &self,
        id: GatewayConfigurationId,
    ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send;

    /// Replace the channels and extra channels of an existing configuration.
    ///
    /// Returns the configuration as stored: `created_at` comes from the
    /// existing row, not from the value passed in.
    fn update(
        &self,
        config: GatewayConfiguration,
    ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send;

    /// Delete a configuration and, with it, its extra channels.
    fn delete(
        &self,
        id: GatewayConfigurationId,
    ) -> impl Future<Output = Result<(), GatewayCfgError>> + Send;
}
