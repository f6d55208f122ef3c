//! Error types for restyle

use thiserror::Error;

/// Result type alias for restyle operations
pub type Result<T> = std::result::Result<T, RestyleError>;

/// Engine and session error types
#[derive(Error, Debug)]
pub enum RestyleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A range or index fell outside the current bounds of a store or buffer
    #[error("Range {start}..{end} out of bounds for length {len}")]
    OutOfRange { start: usize, end: usize, len: usize },

    /// A tag buffer handed to the classifier does not match its text
    #[error("Malformed span: {text_len} bytes of text but {tags_len} tags")]
    MalformedSpan { text_len: usize, tags_len: usize },

    #[error("No file name set")]
    NoFilename,

    #[error("{0}")]
    Usage(String),
}

impl RestyleError {
    /// Build an `OutOfRange` error for `start..end` against `len`
    pub fn out_of_range(start: usize, end: usize, len: usize) -> Self {
        RestyleError::OutOfRange { start, end, len }
    }
}

/// Check that `start..end` is a valid range into a sequence of `len` items
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start > end || end > len {
        return Err(RestyleError::out_of_range(start, end, len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(check_range(0, 0, 0).is_ok());
        assert!(check_range(2, 5, 5).is_ok());
        assert!(check_range(3, 2, 5).is_err());
        assert!(check_range(0, 6, 5).is_err());
    }

    #[test]
    fn test_out_of_range_message() {
        let err = RestyleError::out_of_range(4, 9, 6);
        assert_eq!(err.to_string(), "Range 4..9 out of bounds for length 6");
    }
}
