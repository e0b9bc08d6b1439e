//! Error types for the task manager.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to decode a single store line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A store line that fails to decode. Carries the physical line number.
    #[error("malformed record in '{}' at line {line}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        source: ParseError,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Console I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input stream reached end of file mid-prompt.
    #[error("input stream closed")]
    InputClosed,
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
