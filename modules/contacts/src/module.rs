use std::sync::Arc;

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::tui::ContactsController;
use crate::config::ContactsConfig;
use crate::contract::client::ContactsApi;
use crate::domain::service::Service;
use crate::gateways::local::ContactsLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmContactsRepository;

/// Wires storage, domain service and the local client together.
#[derive(Clone)]
pub struct ContactsModule {
    api: Arc<dyn ContactsApi>,
    config: ContactsConfig,
}

impl ContactsModule {
    /// Run migrations on `db` and build the module on top of it.
    pub async fn init(db: &db::DbHandle, cfg: ContactsConfig) -> anyhow::Result<Self> {
        info!("Initializing contacts module");
        debug!(
            "Loaded contacts config: show_success_notices={}",
            cfg.show_success_notices
        );

        Self::migrate(db).await?;

        // Wire repository (infra) to domain service (port)
        let repo = SeaOrmContactsRepository::new(db.sea());
        let service = Service::new(Arc::new(repo));

        let api: Arc<dyn ContactsApi> = Arc::new(ContactsLocalClient::new(Arc::new(service)));
        Ok(Self { api, config: cfg })
    }

    pub async fn migrate(db: &db::DbHandle) -> anyhow::Result<()> {
        info!("Running contacts database migrations");
        Migrator::up(&db.sea(), None)
            .await
            .context("contacts migrations failed")?;
        info!("Contacts database migrations completed successfully");
        Ok(())
    }

    /// The storage handle other components use.
    pub fn api(&self) -> Arc<dyn ContactsApi> {
        Arc::clone(&self.api)
    }

    pub fn config(&self) -> &ContactsConfig {
        &self.config
    }

    /// A fresh UI controller bound to this module's storage.
    pub fn controller(&self) -> ContactsController {
        ContactsController::new(self.api(), self.config.clone())
    }
}
