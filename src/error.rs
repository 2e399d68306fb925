//! Error types for BBO reconstruction.
//!
//! Only decode and I/O failures surface as errors. Feed inconsistencies
//! (unknown order ids, unknown codes) are absorbed by the engine and counted
//! in its statistics instead.

use thiserror::Error;

/// Result type alias for BBO operations.
pub type Result<T> = std::result::Result<T, BboError>;

/// Main error type for BBO operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BboError {
    /// A record line could not be decoded. Fatal for the whole run.
    #[error("Decode error at line {line}: invalid {field} value {value:?}")]
    Decode {
        /// 1-based line number in the input file
        line: usize,
        /// Name of the offending field
        field: &'static str,
        /// Raw text of the offending field
        value: String,
    },

    /// File open/read/write failure
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid command-line usage
    #[error("Usage error: {0}")]
    Usage(String),

    /// Book state inconsistency detected by an invariant check
    #[error("Book inconsistency: {0}")]
    InconsistentState(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Generic(String),
}

impl BboError {
    /// Create a decode error for `field` on `line`.
    pub fn decode(line: usize, field: &'static str, value: impl Into<String>) -> Self {
        BboError::Decode {
            line,
            field,
            value: value.into(),
        }
    }
}

impl From<std::io::Error> for BboError {
    fn from(err: std::io::Error) -> Self {
        BboError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BboError {
    fn from(err: serde_json::Error) -> Self {
        BboError::Generic(format!("JSON error: {err}"))
    }
}

impl From<String> for BboError {
    fn from(err: String) -> Self {
        BboError::Generic(err)
    }
}

impl From<&str> for BboError {
    fn from(err: &str) -> Self {
        BboError::Generic(err.to_string())
    }
}
