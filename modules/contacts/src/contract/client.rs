use async_trait::async_trait;

use crate::contract::{
    error::ContactsError,
    model::{Contact, ContactId, ContactUpdate, NewContact},
};

/// Public API trait for the contacts module; the storage handle the UI owns
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// Get a contact by ID
    async fn get_contact(&self, id: ContactId) -> Result<Contact, ContactsError>;

    /// List all contacts ordered by id
    async fn list_contacts(&self) -> Result<Vec<Contact>, ContactsError>;

    /// Create a new contact and return its assigned ID
    async fn create_contact(&self, new_contact: NewContact) -> Result<ContactId, ContactsError>;

    /// Replace a contact's fields. Returns false if no such contact exists.
    async fn update_contact(&self, id: ContactId, update: ContactUpdate)
        -> Result<bool, ContactsError>;

    /// Delete a contact by ID. Returns false if no such contact exists.
    async fn delete_contact(&self, id: ContactId) -> Result<bool, ContactsError>;
}
