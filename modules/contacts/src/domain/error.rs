use thiserror::Error;

use crate::contract::model::ContactId;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Contact not found: {id}")]
    ContactNotFound { id: ContactId },

    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn contact_not_found(id: ContactId) -> Self {
        Self::ContactNotFound { id }
    }

    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
