#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use contacts::api::tui::ContactsController;
use contacts::config::ContactsConfig;
use contacts::contract::client::ContactsApi;
use contacts::ContactsModule;
use db::{ConnectOpts, DbHandle};

/// Fresh in-memory database with migrations applied.
pub async fn create_test_db() -> Result<DbHandle> {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
    ContactsModule::migrate(&db).await?;
    Ok(db)
}

pub async fn create_test_module(cfg: ContactsConfig) -> Result<(DbHandle, ContactsModule)> {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
    let module = ContactsModule::init(&db, cfg).await?;
    Ok((db, module))
}

/// Local client over a fresh database. The handle must outlive the client.
pub async fn create_test_client() -> Result<(DbHandle, Arc<dyn ContactsApi>)> {
    let (db, module) = create_test_module(ContactsConfig::default()).await?;
    Ok((db, module.api()))
}

/// Controller over a fresh database, list already loaded.
pub async fn create_test_controller(
    cfg: ContactsConfig,
) -> Result<(DbHandle, ContactsController)> {
    let (db, module) = create_test_module(cfg).await?;
    let mut controller = module.controller();
    controller.refresh().await?;
    Ok((db, controller))
}

pub fn fill_form(controller: &mut ContactsController, name: &str, phone: &str, email: &str) {
    let form = controller.form_mut();
    form.name = name.to_string();
    form.phone = phone.to_string();
    form.email = email.to_string();
}
