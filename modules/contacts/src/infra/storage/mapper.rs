use crate::contract::model::Contact;
use crate::infra::storage::entity::Model as ContactEntity;

/// Convert a database entity to a contract model
pub fn entity_to_contract(entity: ContactEntity) -> Contact {
    Contact {
        id: entity.id,
        name: entity.name,
        phone: entity.phone,
        email: entity.email,
    }
}

impl From<ContactEntity> for Contact {
    fn from(entity: ContactEntity) -> Self {
        entity_to_contract(entity)
    }
}
