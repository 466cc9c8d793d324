use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::ContactsApi,
    error::ContactsError,
    model::{Contact, ContactId, ContactUpdate, NewContact},
};
use crate::domain::service::Service;

/// Local implementation of the ContactsApi trait that delegates to the domain service
pub struct ContactsLocalClient {
    service: Arc<Service>,
}

impl ContactsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContactsApi for ContactsLocalClient {
    async fn get_contact(&self, id: ContactId) -> Result<Contact, ContactsError> {
        self.service.get_contact(id).await.map_err(Into::into)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, ContactsError> {
        self.service.list_contacts().await.map_err(Into::into)
    }

    async fn create_contact(&self, new_contact: NewContact) -> Result<ContactId, ContactsError> {
        self.service
            .create_contact(new_contact)
            .await
            .map_err(Into::into)
    }

    async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<bool, ContactsError> {
        self.service
            .update_contact(id, update)
            .await
            .map_err(Into::into)
    }

    async fn delete_contact(&self, id: ContactId) -> Result<bool, ContactsError> {
        self.service.delete_contact(id).await.map_err(Into::into)
    }
}
