//! Gateway configuration service — use-cases for managing gateway
//! configurations.

use gatewaycfg_domain::error::GatewayCfgError;
use gatewaycfg_domain::gateway_configuration::GatewayConfiguration;
use gatewaycfg_domain::id::GatewayConfigurationId;

use crate::ports::GatewayConfigurationRepository;

/// Application service for gateway configuration CRUD operations.
pub struct GatewayConfigurationService<R> {
    repo: R,
}

impl<R: GatewayConfigurationRepository> GatewayConfigurationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayCfgError::ConstraintViolation`] when the id is
    /// already taken, or a storage error from the repository.
    pub async fn create_configuration(
        &self,
        config: GatewayConfiguration,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        self.repo.create(config).await
    }

    /// Look up a configuration by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayCfgError::NotFound`] when no configuration with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_configuration(
        &self,
        id: GatewayConfigurationId,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        self.repo.get_by_id(id).await
    }

    /// Replace an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayCfgError::NotFound`] when the configuration does not
    /// exist, or a storage error from the repository.
    pub async fn update_configuration(
        &self,
        config: GatewayConfiguration,
    ) -> Result<GatewayConfiguration, GatewayCfgError> {
        self.repo.update(config).await
    }

    /// Delete a configuration by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayCfgError::NotFound`] when the configuration does not
    /// exist, or a storage error from the repository.
    pub async fn delete_configuration(
        &self,
        id: GatewayConfigurationId,
    ) -> Result<(), GatewayCfgError> {
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatewaycfg_domain::error::{ConstraintViolationError, NotFoundError};
    use gatewaycfg_domain::gateway_configuration::{ExtraChannel, Modulation};
    use gatewaycfg_domain::time;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryGatewayConfigurationRepo {
        store: Mutex<HashMap<GatewayConfigurationId, GatewayConfiguration>>,
    }

    fn not_found(id: Option<GatewayConfigurationId>) -> GatewayCfgError {
        NotFoundError {
            entity: "GatewayConfiguration",
            id: id.map(|id| id.to_string()).unwrap_or_default(),
        }
        .into()
    }

    impl GatewayConfigurationRepository for InMemoryGatewayConfigurationRepo {
        fn create(
            &self,
            mut config: GatewayConfiguration,
        ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send {
            let mut store = self.store.lock().unwrap();
            let id = *config.id.get_or_insert_with(GatewayConfigurationId::new);
            let result = if store.contains_key(&id) {
                Err(ConstraintViolationError::Unique("duplicate id".into()).into())
            } else {
                let now = time::now();
                config.created_at = now;
                config.updated_at = now;
                store.insert(id, config.clone());
                Ok(config)
            };
            async { result }
        }

        fn get_by_id(
            &self,
            id: GatewayConfigurationId,
        ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned().ok_or_else(|| not_found(Some(id)));
            async { result }
        }

        fn update(
            &self,
            mut config: GatewayConfiguration,
        ) -> impl Future<Output = Result<GatewayConfiguration, GatewayCfgError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = match config.id.and_then(|id| store.get_mut(&id)) {
                Some(existing) => {
                    config.created_at = existing.created_at;
                    config.updated_at = time::now();
                    *existing = config.clone();
                    Ok(config)
                }
                None => Err(not_found(config.id)),
            };
            async { result }
        }

        fn delete(
            &self,
            id: GatewayConfigurationId,
        ) -> impl Future<Output = Result<(), GatewayCfgError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store.remove(&id).map(|_| ()).ok_or_else(|| not_found(Some(id)));
            async { result }
        }
    }

    fn make_service() -> GatewayConfigurationService<InMemoryGatewayConfigurationRepo> {
        GatewayConfigurationService::new(InMemoryGatewayConfigurationRepo::default())
    }

    fn valid_configuration() -> GatewayConfiguration {
        GatewayConfiguration::builder()
            .channels([0, 1, 2])
            .extra_channel(ExtraChannel {
                modulation: Modulation::LoRa,
                frequency: 868_700_000,
                bandwidth: 125,
                bitrate: 0,
                spreading_factors: vec![10, 11, 12],
            })
            .build()
    }

    #[tokio::test]
    async fn should_assign_id_when_creating_configuration() {
        let svc = make_service();

        let created = svc.create_configuration(valid_configuration()).await.unwrap();
        let id = created.id.unwrap();

        let fetched = svc.get_configuration(id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_reject_create_when_id_already_taken() {
        let svc = make_service();
        let created = svc.create_configuration(valid_configuration()).await.unwrap();

        let mut duplicate = valid_configuration();
        duplicate.id = created.id;
        let result = svc.create_configuration(duplicate).await;
        assert!(matches!(
            result,
            Err(GatewayCfgError::ConstraintViolation(
                ConstraintViolationError::Unique(_)
            ))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_configuration_missing() {
        let svc = make_service();
        let result = svc.get_configuration(GatewayConfigurationId::new()).await;
        assert!(matches!(result, Err(GatewayCfgError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_replace_channels_on_update() {
        let svc = make_service();
        let mut config = svc.create_configuration(valid_configuration()).await.unwrap();

        config.channels = vec![0, 1];
        config.extra_channels.clear();
        let saved = svc.update_configuration(config.clone()).await.unwrap();
        assert!(saved.updated_at >= saved.created_at);

        let fetched = svc.get_configuration(config.id.unwrap()).await.unwrap();
        assert_eq!(fetched.channels, vec![0, 1]);
        assert!(fetched.extra_channels.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_unknown_configuration() {
        let svc = make_service();
        let mut config = valid_configuration();
        config.id = Some(GatewayConfigurationId::new());

        let result = svc.update_configuration(config).await;
        assert!(matches!(result, Err(GatewayCfgError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_configuration() {
        let svc = make_service();
        let created = svc.create_configuration(valid_configuration()).await.unwrap();
        let id = created.id.unwrap();

        svc.delete_configuration(id).await.unwrap();

        let result = svc.get_configuration(id).await;
        assert!(matches!(result, Err(GatewayCfgError::NotFound(_))));
        let again = svc.delete_configuration(id).await;
        assert!(matches!(again, Err(GatewayCfgError::NotFound(_))));
    }
}
