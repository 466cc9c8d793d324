use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{Contact, ContactId, ContactUpdate, NewContact};
use crate::domain::error::DomainError;
use crate::domain::repo::ContactsRepository;

/// Domain service with business rules for contact management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ContactsRepository>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn ContactsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "contacts.service.get_contact", skip(self), fields(contact_id = id))]
    pub async fn get_contact(&self, id: ContactId) -> Result<Contact, DomainError> {
        debug!("Getting contact by id");

        let contact = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::contact_not_found(id))?;
        debug!("Successfully retrieved contact");
        Ok(contact)
    }

    #[instrument(name = "contacts.service.list_contacts", skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, DomainError> {
        debug!("Listing contacts");

        let contacts = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Successfully listed {} contacts", contacts.len());
        Ok(contacts)
    }

    #[instrument(name = "contacts.service.create_contact", skip(self, new_contact))]
    pub async fn create_contact(&self, new_contact: NewContact) -> Result<ContactId, DomainError> {
        info!("Creating new contact");

        let (name, phone, email) =
            normalize_fields(&new_contact.name, &new_contact.phone, &new_contact.email)?;

        let id = self
            .repo
            .insert(NewContact { name, phone, email })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created contact with id={}", id);
        Ok(id)
    }

    #[instrument(
        name = "contacts.service.update_contact",
        skip(self, update),
        fields(contact_id = id)
    )]
    pub async fn update_contact(
        &self,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<bool, DomainError> {
        info!("Updating contact");

        let (name, phone, email) = normalize_fields(&update.name, &update.phone, &update.email)?;

        let updated = self
            .repo
            .update(id, ContactUpdate { name, phone, email })
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if updated {
            info!("Successfully updated contact");
        } else {
            debug!("No contact with this id, nothing updated");
        }
        Ok(updated)
    }

    #[instrument(name = "contacts.service.delete_contact", skip(self), fields(contact_id = id))]
    pub async fn delete_contact(&self, id: ContactId) -> Result<bool, DomainError> {
        info!("Deleting contact");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if deleted {
            info!("Successfully deleted contact");
        } else {
            debug!("No contact with this id, nothing deleted");
        }
        Ok(deleted)
    }
}

// --- validation helpers ---

/// Trim all three fields and reject the first one left empty.
fn normalize_fields(
    name: &str,
    phone: &str,
    email: &str,
) -> Result<(String, String, String), DomainError> {
    let name = required("name", name)?;
    let phone = required("phone", phone)?;
    let email = required("email", email)?;
    Ok((name, phone, email))
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::empty_field(field));
    }
    Ok(trimmed.to_string())
}
