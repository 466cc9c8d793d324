use async_trait::async_trait;

use crate::contract::model::{Contact, ContactId, ContactUpdate, NewContact};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ContactsRepository: Send + Sync {
    /// Load a contact by id.
    async fn find_by_id(&self, id: ContactId) -> anyhow::Result<Option<Contact>>;
    /// All contacts, ascending by id.
    async fn list_all(&self) -> anyhow::Result<Vec<Contact>>;
    /// Insert validated fields; storage assigns the id.
    async fn insert(&self, c: NewContact) -> anyhow::Result<ContactId>;
    /// Overwrite the fields of `id`. Returns true if a row was updated.
    async fn update(&self, id: ContactId, c: ContactUpdate) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: ContactId) -> anyhow::Result<bool>;
}
