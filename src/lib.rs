//! Scrollable terminal menus of editable fields.
//!
//! A [`Menu`](widgets::menu::Menu) owns an ordered list of
//! [`Field`](widgets::field::Field)s, keeps one of them focused inside a
//! window no taller than the terminal, and routes keys from a
//! [`Surface`](ui::Surface) until the form is saved or cancelled.

pub mod error;
pub mod model;
pub mod nav;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use error::Error;
pub use nav::keys::Key;
pub use widgets::field::{Field, FieldValue};
pub use widgets::menu::{Menu, MenuHandle, MenuResult, Outcome};
