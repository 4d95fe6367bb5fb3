use thiserror::Error;

/// Errors produced when building or parsing query-core values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An enumeration string did not match any known option.
    /// Surfaced instead of silently defaulting so integration bugs show up early.
    #[error("unrecognized {field} option: '{value}'")]
    UnrecognizedOption { field: &'static str, value: String },

    #[error("task title must be 1-{max} characters after trimming, got {len}")]
    InvalidTitle { len: usize, max: usize },

    #[error("task description must be at most {max} characters, got {len}")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("tag name must be 1-{max} characters after trimming, got {len}")]
    InvalidTagName { len: usize, max: usize },

    #[error("tag color must be a #RRGGBB hex value, got '{0}'")]
    InvalidTagColor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
