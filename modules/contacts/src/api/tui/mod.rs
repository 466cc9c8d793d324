//! Terminal front-end: form state, key bindings, rendering and the event loop.

pub mod controller;
pub mod event_loop;
pub mod form;
pub mod keymap;
pub mod view;

pub use controller::{Action, ContactsController, Notice, NoticeKind, UiError};
pub use event_loop::run;
pub use form::{ContactForm, Field, Focus};
