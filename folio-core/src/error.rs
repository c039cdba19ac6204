//! Error types for Folio Core

use crate::parser::FailReason;
use thiserror::Error;

/// Result type alias using FolioError
pub type Result<T> = std::result::Result<T, FolioError>;

/// Top-level error type for all Folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("No match: {0}")]
    NoMatch(#[from] FailReason),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while building a node tree or reading extracted values
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors raised while composing patterns
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("capture '{0}' is bound more than once in the same sequence")]
    DuplicateCapture(String),

    #[error("a sequence needs at least one pattern")]
    EmptySequence,
}
