use crate::error::Error;
use crate::nav::keys::Key;
use regex::Regex;

/// Edit state shared by text and password fields.
#[derive(Clone, Debug)]
pub struct TextInput {
    value: String,
    max_len: usize,
    pattern: Option<Regex>,
    // false until the first edit key after activation; that key replaces the value
    changed: bool,
}

impl TextInput {
    /// An empty `pattern` accepts any value. Anything else must match the
    /// whole value, not just a prefix.
    pub fn new(label: &str, max_len: usize, value: &str, pattern: &str) -> Result<Self, Error> {
        let pattern = if pattern.is_empty() {
            None
        } else {
            let anchored = format!("^(?:{pattern})$");
            Some(Regex::new(&anchored).map_err(|source| Error::InvalidPattern {
                label: label.to_string(),
                pattern: pattern.to_string(),
                source,
            })?)
        };
        Ok(Self {
            value: value.to_string(),
            max_len,
            pattern,
            changed: false,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_valid(&self) -> bool {
        self.pattern
            .as_ref()
            .map_or(true, |re| re.is_match(&self.value))
    }

    pub fn is_edit_key(key: Key) -> bool {
        matches!(key, Key::Backspace | Key::Delete) || key.alnum().is_some()
    }

    /// Start a new edit session: the next edit key discards the current value.
    pub fn activate(&mut self) {
        self.changed = false;
    }

    pub fn edit(&mut self, key: Key) {
        if !Self::is_edit_key(key) {
            return;
        }
        if !self.changed {
            self.value.clear();
            self.changed = true;
        }
        match key {
            Key::Backspace => {
                self.value.pop();
            }
            Key::Delete => self.value.clear(),
            _ => {
                if let Some(c) = key.alnum() {
                    if self.value.chars().count() < self.max_len {
                        self.value.push(c);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.edit(Key::Char(c));
        }
    }

    #[test]
    fn first_keystroke_replaces_prefilled_value() {
        let mut t = TextInput::new("t", 5, "ab", ".{3,}").unwrap();
        assert!(!t.is_valid());
        t.activate();
        t.edit(Key::Char('x'));
        assert_eq!(t.value(), "x");
        typed(&mut t, "yz");
        assert_eq!(t.value(), "xyz");
        assert!(t.is_valid());
    }

    #[test]
    fn max_length_caps_input() {
        let mut t = TextInput::new("t", 5, "", ".{3,}").unwrap();
        t.activate();
        typed(&mut t, "abcdef");
        assert_eq!(t.value(), "abcde");
    }

    #[test]
    fn backspace_and_delete() {
        let mut t = TextInput::new("t", 10, "", "").unwrap();
        t.activate();
        t.edit(Key::Backspace);
        assert_eq!(t.value(), "");
        typed(&mut t, "abc");
        t.edit(Key::Backspace);
        assert_eq!(t.value(), "ab");
        t.edit(Key::Delete);
        assert_eq!(t.value(), "");
    }

    #[test]
    fn non_edit_keys_do_not_consume_the_first_keystroke() {
        let mut t = TextInput::new("t", 10, "keep", "").unwrap();
        t.activate();
        t.edit(Key::Left);
        t.edit(Key::Char('-'));
        assert_eq!(t.value(), "keep");
        t.edit(Key::Char('n'));
        assert_eq!(t.value(), "n");
    }

    #[test]
    fn pattern_must_match_whole_value() {
        let t = TextInput::new("t", 10, "abcd", ".{3}").unwrap();
        assert!(!t.is_valid());
        let t = TextInput::new("t", 10, "abc", ".{3}").unwrap();
        assert!(t.is_valid());
        let t = TextInput::new("t", 10, "", "^(.{3,})?$").unwrap();
        assert!(t.is_valid());
    }

    #[test]
    fn empty_pattern_accepts_anything() {
        assert!(TextInput::new("t", 10, "", "").unwrap().is_valid());
        assert!(TextInput::new("t", 10, "x y", "").unwrap().is_valid());
    }

    #[test]
    fn bad_pattern_is_rejected() {
        match TextInput::new("Seed", 10, "", "([") {
            Err(Error::InvalidPattern { label, pattern, .. }) => {
                assert_eq!(label, "Seed");
                assert_eq!(pattern, "([");
            }
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }
}
