use thiserror::Error;

use crate::contract::model::ContactId;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    #[error("Contact not found: {id}")]
    NotFound { id: ContactId },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl ContactsError {
    pub fn not_found(id: ContactId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for ContactsError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            ContactNotFound { id } => Self::not_found(id),
            EmptyField { field } => Self::validation(format!("{field} cannot be empty")),
            Database { .. } => Self::internal(),
        }
    }
}
