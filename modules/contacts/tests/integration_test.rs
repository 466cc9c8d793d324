//! Integration-style tests for the contacts storage layer.
//!
//! Each test runs on a fresh in-memory SQLite DB with migrations applied and
//! goes through the local client, so service validation and the SeaORM
//! repository are exercised together.

mod common;

use std::sync::Arc;

use anyhow::Result;
use contacts::contract::{
    client::ContactsApi,
    error::ContactsError,
    model::{Contact, ContactUpdate, NewContact},
};
use contacts::domain::error::DomainError;
use contacts::domain::service::Service;
use contacts::infra::storage::sea_orm_repo::SeaOrmContactsRepository;

use common::{create_test_client, create_test_db};

#[tokio::test]
async fn create_then_list_returns_the_record() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    let id = client
        .create_contact(NewContact::new("Ann", "555-1111", "ann@x.com"))
        .await?;
    assert_eq!(id, 1);

    let all = client.list_contacts().await?;
    assert_eq!(
        all,
        vec![Contact {
            id: 1,
            name: "Ann".into(),
            phone: "555-1111".into(),
            email: "ann@x.com".into(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn full_lifecycle() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    let id = client
        .create_contact(NewContact::new("Ann", "555-1111", "ann@x.com"))
        .await?;

    let updated = client
        .update_contact(id, ContactUpdate::new("Ann B", "555-1111", "ann@x.com"))
        .await?;
    assert!(updated);
    let all = client.list_contacts().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ann B");

    assert!(client.delete_contact(id).await?);
    assert!(client.list_contacts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn list_is_ordered_by_id() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    for name in ["Carol", "Ann", "Bob"] {
        client
            .create_contact(NewContact::new(name, "1", "x@y.z"))
            .await?;
    }

    let names: Vec<String> = client
        .list_contacts()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Carol", "Ann", "Bob"]);
    Ok(())
}

#[tokio::test]
async fn update_touches_only_the_target_record() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    let ann = client
        .create_contact(NewContact::new("Ann", "1", "ann@x.com"))
        .await?;
    let bob = client
        .create_contact(NewContact::new("Bob", "2", "bob@x.com"))
        .await?;

    client
        .update_contact(ann, ContactUpdate::new("Ann B", "11", "annb@x.com"))
        .await?;

    let ann_now = client.get_contact(ann).await?;
    assert_eq!(
        (ann_now.name.as_str(), ann_now.phone.as_str(), ann_now.email.as_str()),
        ("Ann B", "11", "annb@x.com")
    );
    let bob_now = client.get_contact(bob).await?;
    assert_eq!(bob_now.name, "Bob");
    assert_eq!(bob_now.email, "bob@x.com");
    Ok(())
}

#[tokio::test]
async fn empty_fields_are_rejected_and_storage_unchanged() -> Result<()> {
    let (_db, client) = create_test_client().await?;
    let id = client
        .create_contact(NewContact::new("Ann", "1", "ann@x.com"))
        .await?;

    let err = client
        .create_contact(NewContact::new("Bob", "   ", "bob@x.com"))
        .await
        .unwrap_err();
    assert_eq!(err, ContactsError::validation("phone cannot be empty"));

    let err = client
        .update_contact(id, ContactUpdate::new("", "1", "ann@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ContactsError::Validation { .. }));

    let all = client.list_contacts().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Ann");
    Ok(())
}

#[tokio::test]
async fn values_are_trimmed_before_persisting() -> Result<()> {
    let (_db, client) = create_test_client().await?;
    let id = client
        .create_contact(NewContact::new("  Ann ", " 1", "ann@x.com  "))
        .await?;

    let stored = client.get_contact(id).await?;
    assert_eq!(stored.name, "Ann");
    assert_eq!(stored.phone, "1");
    assert_eq!(stored.email, "ann@x.com");
    Ok(())
}

#[tokio::test]
async fn absent_ids_are_noops() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    assert!(!client.delete_contact(42).await?);
    assert!(
        !client
            .update_contact(42, ContactUpdate::new("A", "1", "a@b.c"))
            .await?
    );
    assert_eq!(
        client.get_contact(42).await.unwrap_err(),
        ContactsError::not_found(42)
    );
    assert!(client.list_contacts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() -> Result<()> {
    let (_db, client) = create_test_client().await?;

    let first = client
        .create_contact(NewContact::new("Ann", "1", "a@x.com"))
        .await?;
    let second = client
        .create_contact(NewContact::new("Bob", "2", "b@x.com"))
        .await?;
    client.delete_contact(second).await?;

    let third = client
        .create_contact(NewContact::new("Cid", "3", "c@x.com"))
        .await?;
    assert!(third > second && second > first);
    Ok(())
}

#[tokio::test]
async fn service_reports_domain_errors() -> Result<()> {
    let db = create_test_db().await?;
    let service = Service::new(Arc::new(SeaOrmContactsRepository::new(db.sea())));

    let err = service
        .create_contact(NewContact::new("Ann", "1", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyField { field: "email" }));

    let err = service.get_contact(7).await.unwrap_err();
    assert!(matches!(err, DomainError::ContactNotFound { id: 7 }));
    Ok(())
}

#[tokio::test]
async fn migrations_are_idempotent() -> Result<()> {
    let db = create_test_db().await?;
    contacts::ContactsModule::migrate(&db).await?;

    let client: Arc<dyn ContactsApi> = Arc::new(contacts::gateways::local::ContactsLocalClient::new(
        Arc::new(Service::new(Arc::new(SeaOrmContactsRepository::new(db.sea())))),
    ));
    client
        .create_contact(NewContact::new("Ann", "1", "a@x.com"))
        .await?;
    assert_eq!(client.list_contacts().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn existing_contacts_table_is_adopted() -> Result<()> {
    let db = db::DbHandle::connect("sqlite::memory:", db::ConnectOpts::default()).await?;
    exec_raw(
        &db,
        "CREATE TABLE contacts (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, phone TEXT NOT NULL, email TEXT NOT NULL)",
    )
    .await?;
    exec_raw(
        &db,
        "INSERT INTO contacts (name, phone, email) VALUES ('Old', '000', 'old@x.com')",
    )
    .await?;

    let module = contacts::ContactsModule::init(&db, Default::default()).await?;
    let all = module.api().list_contacts().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Old");
    Ok(())
}

async fn exec_raw(db: &db::DbHandle, sql: &str) -> Result<()> {
    use sea_orm::ConnectionTrait;
    db.sea().execute_unprepared(sql).await?;
    Ok(())
}
