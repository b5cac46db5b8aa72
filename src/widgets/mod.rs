pub mod field;
pub mod menu;
pub mod text_input;

use crate::nav::keys::Key;
use crate::ui::Surface;
use anyhow::Result;

use field::FieldValue;

/// What the menu needs from every field: a value snapshot, a one-line
/// rendering, a validity check and a key handler that mutates only the
/// field itself (a button's action aside).
pub trait Widget {
    fn value(&self) -> Option<FieldValue>;
    fn display_text(&self) -> String;
    fn is_valid(&self) -> bool {
        true
    }
    fn on_key(&mut self, key: Key) {
        let _ = key;
    }
    fn render(&self, surface: &mut dyn Surface, row: u16, col: u16, focused: bool) -> Result<()>;
}
