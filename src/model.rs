use crate::widgets::field::Field;
use crate::widgets::menu::Menu;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// A form definition as written in YAML.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FormConfig {
    // Caps the visible rows below the terminal height
    #[serde(default)]
    pub height: Option<u16>,
    // Headless surface width
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Save,
    Cancel,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConfig {
    Label {
        label: String,
    },
    Text {
        label: String,
        #[serde(default = "default_max_length")]
        max_length: usize,
        #[serde(default)]
        value: String,
        #[serde(default)]
        pattern: String,
    },
    Password {
        label: String,
        #[serde(default = "default_max_length")]
        max_length: usize,
        #[serde(default)]
        pattern: String,
    },
    Toggle {
        label: String,
        #[serde(default)]
        value: bool,
    },
    Range {
        label: String,
        #[serde(default = "default_range_value")]
        value: i64,
        #[serde(default)]
        min: i64,
        #[serde(default = "default_range_max")]
        max: i64,
    },
    Selection {
        label: String,
        options: Vec<String>,
        #[serde(default)]
        index: usize,
    },
    Button {
        label: String,
        action: ButtonAction,
    },
}

fn default_max_length() -> usize {
    10
}

fn default_range_value() -> i64 {
    5
}

fn default_range_max() -> i64 {
    10
}

impl FormConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing form definition")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading form definition {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Visible rows for a surface of `surface_rows`, honoring `height`.
    pub fn rows_for(&self, surface_rows: u16) -> u16 {
        match self.height {
            Some(h) => h.min(surface_rows),
            None => surface_rows,
        }
    }

    /// Build a menu with `rows` visible lines; buttons are wired to the menu handle.
    pub fn build(&self, rows: u16) -> Result<Menu> {
        let mut menu = Menu::new(rows);
        for fc in &self.fields {
            let field = match fc {
                FieldConfig::Label { label } => Field::label(label.as_str()),
                FieldConfig::Text {
                    label,
                    max_length,
                    value,
                    pattern,
                } => Field::text(label.as_str(), *max_length, value, pattern)?,
                FieldConfig::Password {
                    label,
                    max_length,
                    pattern,
                } => Field::password(label.as_str(), *max_length, pattern)?,
                FieldConfig::Toggle { label, value } => Field::toggle(label.as_str(), *value),
                FieldConfig::Range {
                    label,
                    value,
                    min,
                    max,
                } => Field::range(label.as_str(), *value, *min, *max)?,
                FieldConfig::Selection {
                    label,
                    options,
                    index,
                } => Field::selection(label.as_str(), options.clone(), *index)?,
                FieldConfig::Button { label, action } => match action {
                    ButtonAction::Save => menu.save_button(label.as_str()),
                    ButtonAction::Cancel => menu.cancel_button(label.as_str()),
                },
            };
            menu.push(field);
        }
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::nav::keys::Key;
    use crate::widgets::field::FieldValue;
    use crate::widgets::menu::Outcome;

    const FORM: &str = r#"
height: 4
fields:
  - type: text
    label: Player 1
    value: Lukas
    pattern: ".{3}"
  - type: range
    label: Width
    value: 7
    min: 3
  - type: selection
    label: Mode
    options: [easy, hard]
  - type: toggle
    label: Sound
  - type: password
    label: PIN
    max_length: 4
    pattern: "^3141$"
  - type: button
    label: Save
    action: save
  - type: button
    label: Cancel
    action: cancel
"#;

    #[test]
    fn parses_and_builds_every_kind() {
        let cfg = FormConfig::from_yaml(FORM).unwrap();
        assert_eq!(cfg.fields.len(), 7);
        assert_eq!(cfg.rows_for(24), 4);
        assert_eq!(cfg.rows_for(3), 3);
        let menu = cfg.build(cfg.rows_for(24)).unwrap();
        assert_eq!(menu.len(), 7);
        assert_eq!(menu.viewport(), 0..4);
        assert_eq!(
            menu.values(),
            vec![
                Some(FieldValue::Text("Lukas".into())),
                Some(FieldValue::Int(7)),
                Some(FieldValue::Index(0)),
                Some(FieldValue::Bool(false)),
                Some(FieldValue::Text(String::new())),
                None,
                None,
            ]
        );
    }

    #[test]
    fn text_defaults_follow_the_demo() {
        let cfg = FormConfig::from_yaml("fields:\n  - type: text\n    label: Seed\n").unwrap();
        match &cfg.fields[0] {
            FieldConfig::Text {
                max_length,
                value,
                pattern,
                ..
            } => {
                assert_eq!(*max_length, 10);
                assert!(value.is_empty());
                assert!(pattern.is_empty());
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(cfg.rows_for(24), 24);
    }

    #[test]
    fn configured_buttons_reach_the_menu() {
        let cfg = FormConfig::from_yaml(FORM).unwrap();
        let mut menu = cfg.build(10).unwrap();
        menu.reset();
        for _ in 0..5 {
            menu.dispatch(Key::Down);
        }
        // Save with an empty PIN is ignored
        menu.dispatch(Key::Enter);
        assert_eq!(menu.outcome(), Outcome::Running);
        menu.dispatch(Key::Down);
        menu.dispatch(Key::Enter);
        assert_eq!(menu.outcome(), Outcome::Cancelled);
    }

    #[test]
    fn bad_definitions_surface_typed_errors() {
        let cfg = FormConfig::from_yaml(
            "fields:\n  - type: selection\n    label: Mode\n    options: []\n",
        )
        .unwrap();
        let err = cfg.build(5).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoOptions { .. })
        ));
        assert!(FormConfig::from_yaml("fields:\n  - type: slider\n    label: x\n").is_err());
    }
}
