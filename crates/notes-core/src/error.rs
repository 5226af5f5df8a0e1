//! Error types for notes-core

use thiserror::Error;

/// Result type alias using notes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notes-core operations
///
/// Ignored inserts and updates or deletes of a missing id are not errors;
/// those report their outcome through the return value instead.
#[derive(Error, Debug)]
pub enum Error {
    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
