use crate::error::Error;
use crate::nav::keys::Key;
use crate::theme::Emphasis;
use crate::ui::Surface;
use crate::widgets::text_input::TextInput;
use crate::widgets::Widget;
use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// Column where input values start, after the label.
pub const VALUE_COLUMN: u16 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Index(usize),
}

/// Bound button callback.
pub struct Action(Box<dyn FnMut()>);

impl Action {
    pub fn new(f: impl FnMut() + 'static) -> Self {
        Self(Box::new(f))
    }

    fn invoke(&mut self) {
        (self.0)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[derive(Debug)]
pub enum FieldKind {
    Label,
    Text(TextInput),
    Password(TextInput),
    Toggle(bool),
    // Clamped, never wraps
    Range { value: i64, min: i64, max: i64 },
    // Wraps, never clamps
    Selection { options: Vec<String>, index: usize },
    Button(Action),
}

#[derive(Debug)]
pub struct Field {
    name: String,
    editing: bool,
    kind: FieldKind,
}

impl Field {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            editing: false,
            kind,
        }
    }

    pub fn label(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Label)
    }

    pub fn text(
        name: impl Into<String>,
        max_len: usize,
        value: &str,
        pattern: &str,
    ) -> Result<Self, Error> {
        let name = name.into();
        let input = TextInput::new(&name, max_len, value, pattern)?;
        Ok(Self::with_kind(name, FieldKind::Text(input)))
    }

    /// Password fields always start empty.
    pub fn password(name: impl Into<String>, max_len: usize, pattern: &str) -> Result<Self, Error> {
        let name = name.into();
        let input = TextInput::new(&name, max_len, "", pattern)?;
        Ok(Self::with_kind(name, FieldKind::Password(input)))
    }

    pub fn toggle(name: impl Into<String>, value: bool) -> Self {
        Self::with_kind(name, FieldKind::Toggle(value))
    }

    pub fn range(name: impl Into<String>, value: i64, min: i64, max: i64) -> Result<Self, Error> {
        let name = name.into();
        if min > max || value < min || value > max {
            return Err(Error::InvalidRange {
                label: name,
                value,
                min,
                max,
            });
        }
        Ok(Self::with_kind(name, FieldKind::Range { value, min, max }))
    }

    pub fn selection(
        name: impl Into<String>,
        options: Vec<String>,
        index: usize,
    ) -> Result<Self, Error> {
        let name = name.into();
        if options.is_empty() {
            return Err(Error::NoOptions { label: name });
        }
        if index >= options.len() {
            return Err(Error::IndexOutOfRange {
                label: name,
                index,
                len: options.len(),
            });
        }
        Ok(Self::with_kind(name, FieldKind::Selection { options, index }))
    }

    pub fn button(name: impl Into<String>, action: impl FnMut() + 'static) -> Self {
        Self::with_kind(name, FieldKind::Button(Action::new(action)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether the field currently swallows every key, navigation included.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn stop_editing(&mut self) {
        self.editing = false;
    }
}

impl Widget for Field {
    fn value(&self) -> Option<FieldValue> {
        match &self.kind {
            FieldKind::Label | FieldKind::Button(_) => None,
            FieldKind::Text(input) | FieldKind::Password(input) => {
                Some(FieldValue::Text(input.value().to_string()))
            }
            FieldKind::Toggle(on) => Some(FieldValue::Bool(*on)),
            FieldKind::Range { value, .. } => Some(FieldValue::Int(*value)),
            FieldKind::Selection { index, .. } => Some(FieldValue::Index(*index)),
        }
    }

    fn display_text(&self) -> String {
        match &self.kind {
            FieldKind::Label => self.name.clone(),
            FieldKind::Button(_) => format!("[{}]", self.name),
            FieldKind::Text(input) => input.value().to_string(),
            FieldKind::Password(input) => "*".repeat(input.value().chars().count()),
            FieldKind::Toggle(true) => "On".into(),
            FieldKind::Toggle(false) => "Off".into(),
            FieldKind::Range { value, .. } => value.to_string(),
            FieldKind::Selection { options, index } => options[*index].clone(),
        }
    }

    fn is_valid(&self) -> bool {
        match &self.kind {
            FieldKind::Text(input) | FieldKind::Password(input) => input.is_valid(),
            _ => true,
        }
    }

    fn on_key(&mut self, key: Key) {
        match &mut self.kind {
            FieldKind::Label => {}
            FieldKind::Text(input) | FieldKind::Password(input) => {
                if self.editing {
                    match key {
                        Key::Enter | Key::Esc => self.editing = false,
                        other => input.edit(other),
                    }
                } else if key == Key::Enter {
                    self.editing = true;
                    input.activate();
                } else if TextInput::is_edit_key(key) {
                    // Typing on a focused field starts editing with that key
                    self.editing = true;
                    input.activate();
                    input.edit(key);
                }
            }
            FieldKind::Toggle(on) => {
                if matches!(key, Key::Left | Key::Right) {
                    *on = !*on;
                }
            }
            FieldKind::Range { value, min, max } => match key {
                Key::Left => *value = value.saturating_sub(1).max(*min),
                Key::Right => *value = value.saturating_add(1).min(*max),
                _ => {}
            },
            FieldKind::Selection { options, index } => {
                let n = options.len();
                match key {
                    Key::Left => *index = (*index + n - 1) % n,
                    Key::Right => *index = (*index + 1) % n,
                    _ => {}
                }
            }
            FieldKind::Button(action) => {
                if key == Key::Enter {
                    action.invoke();
                }
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface, row: u16, col: u16, focused: bool) -> Result<()> {
        let highlight = Emphasis::when(focused);
        match &self.kind {
            FieldKind::Label | FieldKind::Button(_) => {
                surface.write_styled(row, col, &self.display_text(), highlight)
            }
            _ => {
                surface.write_styled(row, col, &self.name, highlight)?;
                surface.write_styled(
                    row,
                    col.saturating_add(VALUE_COLUMN),
                    &self.display_text(),
                    Emphasis::when(!self.is_valid()),
                )
            }
        }
    }
}
