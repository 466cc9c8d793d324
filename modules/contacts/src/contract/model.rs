/// Storage-assigned contact identifier.
pub type ContactId = i64;

/// Pure contact model for inter-module communication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Data for creating a new contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Full replacement data for an existing contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl NewContact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

impl ContactUpdate {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}
