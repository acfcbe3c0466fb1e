//! Module declaration and lifecycle
//!
//! The gateway drives the module in three steps: `migrate`, `init`, then
//! `register_rest`. After `init` the in-process client is available.

use crate::config::Config;
use crate::contract::AppsApi;
use crate::domain::Service;
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Apps service module
pub struct AppsServiceModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for AppsServiceModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl AppsServiceModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the schema up to date
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Apps service migrations completed");
        Ok(())
    }

    /// Build the repository and domain service
    pub fn init(&self, cfg: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        *self.config.write() = cfg;

        let repo = Arc::new(crate::infra::storage::SeaOrmAppsRepository::new(db));
        let service = Arc::new(Service::new(repo));
        *self.service.write() = Some(service);

        tracing::info!(base_path = %self.config.read().base_path, "Apps service initialized");
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client backed by the domain service
    pub fn client(&self) -> Result<Arc<dyn AppsApi>> {
        let client = crate::api::native::NativeClient::new(self.service()?);
        Ok(Arc::new(client))
    }

    /// Mount the REST routes under the configured base path
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;
        let base_path = self.config.read().base_path.clone();

        tracing::info!(%base_path, "Registering apps service REST routes");
        crate::api::rest::routes::register_routes(router, &base_path, service)
    }
}
