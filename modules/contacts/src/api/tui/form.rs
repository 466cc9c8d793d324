use crate::contract::model::{Contact, ContactUpdate, NewContact};

/// One of the three text inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Email",
        }
    }
}

/// Focusable widgets in Tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Phone,
    Email,
    Add,
    List,
    Update,
    Delete,
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Name,
        Focus::Phone,
        Focus::Email,
        Focus::Add,
        Focus::List,
        Focus::Update,
        Focus::Delete,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    /// The text input behind this focus, if any.
    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Name => Some(Field::Name),
            Focus::Phone => Some(Field::Phone),
            Focus::Email => Some(Field::Email),
            _ => None,
        }
    }
}

/// Raw, untrimmed form contents as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
        }
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self, field: Field) {
        self.value_mut(field).pop();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn fill_from(&mut self, contact: &Contact) {
        self.name = contact.name.clone();
        self.phone = contact.phone.clone();
        self.email = contact.email.clone();
    }

    /// True when every field has non-whitespace content.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.phone, &self.email]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    pub fn to_new_contact(&self) -> NewContact {
        NewContact::new(self.name.trim(), self.phone.trim(), self.email.trim())
    }

    pub fn to_update(&self) -> ContactUpdate {
        ContactUpdate::new(self.name.trim(), self.phone.trim(), self.email.trim())
    }
}
