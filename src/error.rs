//! Error types for the wordsplit library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`WordsplitError`] enum.
//!
//! # Examples
//!
//! ```
//! use wordsplit::error::{Result, WordsplitError};
//!
//! fn parse_rule(rule: &str) -> Result<()> {
//!     Err(WordsplitError::config(format!("invalid mapping rule: '{rule}'")))
//! }
//!
//! assert!(parse_rule("a => VOWEL").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for wordsplit operations.
#[derive(Error, Debug)]
pub enum WordsplitError {
    /// I/O errors (reading rule files, stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors raised by tokenizers or filters
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors (invalid type table rules, bad option values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with WordsplitError.
pub type Result<T> = std::result::Result<T, WordsplitError>;

impl WordsplitError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WordsplitError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        WordsplitError::Config(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WordsplitError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = WordsplitError::analysis("upstream closed");
        assert_eq!(error.to_string(), "Analysis error: upstream closed");

        let error = WordsplitError::config("bad rule");
        assert_eq!(error.to_string(), "Configuration error: bad rule");

        let error = WordsplitError::invalid_argument("empty");
        assert_eq!(error.to_string(), "Error: Invalid argument: empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = WordsplitError::from(io_error);

        match error {
            WordsplitError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
