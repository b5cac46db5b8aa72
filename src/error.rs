use thiserror::Error;

/// Construction and configuration failures.
///
/// Everything that can go wrong *while a menu is running* is expressed as
/// state (an ignored Save, a clamped value), never as an error. These
/// variants only come out of field constructors, form loading and the
/// up-front checks in [`crate::widgets::menu::Menu::run`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("field `{label}`: invalid pattern `{pattern}`")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("field `{label}`: selection needs at least one option")]
    NoOptions { label: String },

    #[error("field `{label}`: initial index {index} out of range for {len} options")]
    IndexOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("field `{label}`: value {value} not within {min}..={max}")]
    InvalidRange {
        label: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("unknown key name `{0}`")]
    UnknownKey(String),

    #[error("menu has no fields")]
    EmptyMenu,
}
