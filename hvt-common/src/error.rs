//! Error handling for the Hack VM translator
//!
//! One error type covers the whole pipeline. Translation is a deterministic
//! batch transform: every error is fatal to the run, nothing is retried,
//! and partial output is never produced.

use crate::source_loc::SourceLocation;
use thiserror::Error;

/// Main translator error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// Malformed VM command: unknown keyword or segment, wrong token
    /// arity, or a non-numeric index.
    #[error("Parse error at {location}: {message}")]
    Parse {
        location: SourceLocation,
        message: String,
    },

    /// A segment/index pair with no addressable cell, e.g. `pointer 2`,
    /// `temp 8`, or a pop into `constant`.
    #[error("Invalid segment access at {location}: {message}")]
    InvalidSegment {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl TranslateError {
    /// Create a parse error
    pub fn parse(message: impl Into<String>, location: SourceLocation) -> Self {
        TranslateError::Parse {
            location,
            message: message.into(),
        }
    }

    /// Create an invalid-segment error
    pub fn invalid_segment(message: impl Into<String>, location: SourceLocation) -> Self {
        TranslateError::InvalidSegment {
            location,
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for TranslateError {
    fn from(err: std::io::Error) -> Self {
        TranslateError::Io {
            message: err.to_string(),
        }
    }
}
