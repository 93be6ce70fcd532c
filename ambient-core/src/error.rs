//! Error types for the ambient text core library.
//!
//! Errors only originate at the loading and configuration boundary.
//! Selection itself (`tick`, `select_key`) is total and never fails.

use thiserror::Error;

/// Top-level error type for all ambient text operations.
#[derive(Error, Debug)]
pub enum AmbientError {
    /// Configuration value is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An authored text table line could not be parsed.
    #[error("Text table parse error at line {line}: {reason}")]
    TableParse {
        /// 1-based line number in the source.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A TOML text table authored an empty or whitespace-only key.
    #[error("Text table key is empty: {0:?}")]
    EmptyKey(String),

    /// The same key was authored more than once.
    #[error("Duplicate text table key: {0}")]
    DuplicateKey(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AmbientError>;
