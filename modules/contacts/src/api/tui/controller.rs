use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::api::tui::form::{ContactForm, Focus};
use crate::config::ContactsConfig;
use crate::contract::{
    client::ContactsApi,
    error::ContactsError,
    model::{Contact, ContactId},
};

/// User-facing failures of a controller action.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("All fields are required!")]
    MissingFields,

    #[error("Please select a contact to update!")]
    NoSelectionForUpdate,

    #[error("Please select a contact to delete!")]
    NoSelectionForDelete,

    #[error("Contact {id} no longer exists!")]
    ContactGone { id: ContactId },

    #[error("Storage error: {0}")]
    Storage(#[from] ContactsError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Modal message shown after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Info => "Success",
            NoticeKind::Error => "Error",
        }
    }
}

/// Input events after key mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    Input(char),
    Backspace,
    CursorUp,
    CursorDown,
    Activate,
    Add,
    Update,
    Delete,
    ClearForm,
    Escape,
    Quit,
}

/// Owns the UI state and binds user actions to storage calls.
pub struct ContactsController {
    api: Arc<dyn ContactsApi>,
    config: ContactsConfig,
    form: ContactForm,
    focus: Focus,
    /// Record loaded into the form for editing.
    selected: Option<ContactId>,
    rows: Vec<Contact>,
    /// Highlighted row in the list.
    cursor: Option<usize>,
    notice: Option<Notice>,
    quit: bool,
}

impl ContactsController {
    pub fn new(api: Arc<dyn ContactsApi>, config: ContactsConfig) -> Self {
        Self {
            api,
            config,
            form: ContactForm::default(),
            focus: Focus::default(),
            selected: None,
            rows: Vec::new(),
            cursor: None,
            notice: None,
            quit: false,
        }
    }

    // --- read-only state for rendering and tests ---

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn selected(&self) -> Option<ContactId> {
        self.selected
    }

    pub fn rows(&self) -> &[Contact] {
        &self.rows
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Highlight a row; out-of-range indices clear the cursor.
    pub fn set_cursor(&mut self, index: Option<usize>) {
        self.cursor = index.filter(|i| *i < self.rows.len());
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    // --- handlers ---

    /// Replace the displayed rows with a fresh listing.
    ///
    /// The cursor follows the contact it pointed at and is dropped when that
    /// contact is gone, so it never lands on a row the user did not pick.
    pub async fn refresh(&mut self) -> Result<(), UiError> {
        let highlighted = self.cursor_id();
        self.rows = self.api.list_contacts().await?;
        self.cursor = highlighted.and_then(|id| self.rows.iter().position(|c| c.id == id));
        debug!(rows = self.rows.len(), "Contact list refreshed");
        Ok(())
    }

    pub fn clear_form(&mut self) {
        self.form.clear();
        self.selected = None;
    }

    pub async fn add(&mut self) -> Result<(), UiError> {
        if !self.form.is_complete() {
            return Err(UiError::MissingFields);
        }
        self.api.create_contact(self.form.to_new_contact()).await?;

        self.clear_form();
        self.refresh().await?;
        self.success("Contact added successfully!");
        Ok(())
    }

    /// Load the highlighted row into the form for editing.
    pub async fn select(&mut self) -> Result<(), UiError> {
        let Some(id) = self.cursor_id() else {
            return Ok(());
        };
        let contact = match self.api.get_contact(id).await {
            Ok(contact) => contact,
            Err(ContactsError::NotFound { id }) => {
                debug!(id, "Highlighted contact is gone, reloading list");
                return self.refresh().await;
            }
            Err(e) => return Err(e.into()),
        };
        self.form.fill_from(&contact);
        self.selected = Some(contact.id);
        Ok(())
    }

    pub async fn update(&mut self) -> Result<(), UiError> {
        let id = self.selected.ok_or(UiError::NoSelectionForUpdate)?;
        if !self.form.is_complete() {
            return Err(UiError::MissingFields);
        }
        let updated = self.api.update_contact(id, self.form.to_update()).await?;

        self.clear_form();
        self.refresh().await?;
        if !updated {
            return Err(UiError::ContactGone { id });
        }
        self.success("Contact updated successfully!");
        Ok(())
    }

    pub async fn delete(&mut self) -> Result<(), UiError> {
        let id = self.cursor_id().ok_or(UiError::NoSelectionForDelete)?;
        let deleted = self.api.delete_contact(id).await?;

        self.clear_form();
        self.refresh().await?;
        if !deleted {
            return Err(UiError::ContactGone { id });
        }
        self.success("Contact deleted successfully!");
        Ok(())
    }

    /// Apply one input action. Failures end up as an error notice.
    pub async fn dispatch(&mut self, action: Action) {
        if action == Action::Quit {
            self.quit = true;
            return;
        }
        // Message-box semantics: the key that closes a notice does nothing else.
        if self.notice.take().is_some() {
            return;
        }

        let result = match action {
            Action::FocusNext => {
                self.focus = self.focus.next();
                Ok(())
            }
            Action::FocusPrev => {
                self.focus = self.focus.prev();
                Ok(())
            }
            Action::Input(c) => {
                if let Some(field) = self.focus.field() {
                    self.form.push_char(field, c);
                }
                Ok(())
            }
            Action::Backspace => {
                if let Some(field) = self.focus.field() {
                    self.form.backspace(field);
                }
                Ok(())
            }
            Action::CursorUp => {
                self.move_cursor(false);
                Ok(())
            }
            Action::CursorDown => {
                self.move_cursor(true);
                Ok(())
            }
            Action::Activate => match self.focus {
                Focus::Name | Focus::Phone | Focus::Email | Focus::Add => self.add().await,
                Focus::List => self.select().await,
                Focus::Update => self.update().await,
                Focus::Delete => self.delete().await,
            },
            Action::Add => self.add().await,
            Action::Update => self.update().await,
            Action::Delete => self.delete().await,
            Action::ClearForm => {
                self.clear_form();
                Ok(())
            }
            Action::Escape => {
                self.selected = None;
                Ok(())
            }
            Action::Quit => Ok(()),
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    // --- internals ---

    fn cursor_id(&self) -> Option<ContactId> {
        self.cursor
            .and_then(|i| self.rows.get(i))
            .map(|contact| contact.id)
    }

    fn move_cursor(&mut self, down: bool) {
        if self.focus != Focus::List || self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.cursor = Some(match (self.cursor, down) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        });
    }

    fn success(&mut self, message: &str) {
        if self.config.show_success_notices {
            self.notice = Some(Notice::info(message));
        }
    }

    fn report(&mut self, err: UiError) {
        if let UiError::Storage(ref e) = err {
            error!(error = %e, "Contact storage operation failed");
        }
        self.notice = Some(Notice::error(err.to_string()));
    }
}
