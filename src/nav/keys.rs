use crate::error::Error;
use crossterm::event::KeyCode;
use std::str::FromStr;

/// Terminal-neutral key event. The surface adapter produces these; the
/// controller and the fields only ever see this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Esc,
    Enter,
    Backspace,
    Delete,
    Char(char),
    Other,
}

impl Key {
    /// Printable ASCII letter or digit, the only characters text fields accept.
    pub fn alnum(self) -> Option<char> {
        match self {
            Key::Char(c) if c.is_ascii_alphanumeric() => Some(c),
            _ => None,
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Esc,
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "esc" => Key::Esc,
            "enter" => Key::Enter,
            "backspace" => Key::Backspace,
            "delete" => Key::Delete,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(Error::UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Parse a comma-separated key script such as `down,enter,x,y,z,enter`.
pub fn parse_script(script: &str) -> Result<Vec<Key>, Error> {
    script
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(Key::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossterm_codes_map_to_neutral_keys() {
        assert_eq!(Key::from(KeyCode::Up), Key::Up);
        assert_eq!(Key::from(KeyCode::Delete), Key::Delete);
        assert_eq!(Key::from(KeyCode::Char('q')), Key::Char('q'));
        assert_eq!(Key::from(KeyCode::F(5)), Key::Other);
        assert_eq!(Key::from(KeyCode::Tab), Key::Other);
    }

    #[test]
    fn script_parses_names_and_single_chars() {
        let keys = parse_script("down, enter,x,Y,7,backspace,esc").unwrap();
        assert_eq!(
            keys,
            vec![
                Key::Down,
                Key::Enter,
                Key::Char('x'),
                Key::Char('Y'),
                Key::Char('7'),
                Key::Backspace,
                Key::Esc,
            ]
        );
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn script_rejects_unknown_names() {
        match parse_script("down,pagedown") {
            Err(Error::UnknownKey(name)) => assert_eq!(name, "pagedown"),
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn alnum_filters_punctuation() {
        assert_eq!(Key::Char('a').alnum(), Some('a'));
        assert_eq!(Key::Char('9').alnum(), Some('9'));
        assert_eq!(Key::Char('-').alnum(), None);
        assert_eq!(Key::Char('é').alnum(), None);
        assert_eq!(Key::Enter.alnum(), None);
    }
}
