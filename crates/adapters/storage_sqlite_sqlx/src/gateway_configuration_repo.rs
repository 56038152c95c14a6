//! `SQLite` implementation of [`GatewayConfigurationRepository`].
//!
//! Each write runs in its own transaction so the parent row and its extra
//! channels are committed together or not at all.

use sqlx::SqlitePool;

use gatewaycfg_app::ports::GatewayConfigurationRepository;
use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::gateway_configuration::GatewayConfiguration;
use gatewaycfg_domain::id::GatewayConfigurationId;

use crate::error::StorageError;
use crate::gateway_configuration;

/// `SQLite`-backed gateway configuration repository.
pub struct SqliteGatewayConfigurationRepository {
    pool: SqlitePool,
}

impl SqliteGatewayConfigurationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl GatewayConfigurationRepository for SqliteGatewayConfigurationRepository {
    async fn create(
        &self,
        mut config: GatewayConfiguration,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        gateway_configuration::create(&mut tx, &mut config).await?;
        tx.commit().await.map_err(StorageError::from)?;

        Ok(config)
    }

    async fn get_by_id(
        &self,
        id: GatewayConfigurationId,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        let mut conn = self.pool.acquire().await.map_err(StorageError::from)?;
        gateway_configuration::get(&mut conn, id).await
    }

    async fn update(
        &self,
        mut config: GatewayConfiguration,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        gateway_configuration::update(&mut tx, &mut config).await?;
        tx.commit().await.map_err(StorageError::from)?;

        Ok(config)
    }

    async fn delete(&self, id: GatewayConfigurationId) -> Result<(), GatewayCfgError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;
        gateway_configuration::delete(&mut tx, id).await?;
        tx.commit().await.map_err(StorageError::from)?;

        Ok(())
    }
}
