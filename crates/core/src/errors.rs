//! Core error types for the InStep application.
//!
//! This module defines backend-agnostic error types. Store-specific
//! failures are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
///
/// Invite-level outcomes (expired, exhausted, group full) are not errors:
/// they are modeled as typed results on the invite operations, because the
/// caller is expected to branch on them rather than abort.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Backend-agnostic error type for document store operations.
///
/// This enum uses `String` for all error details, allowing the storage
/// layer to convert its own error types into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A read or query against the store failed.
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// A targeted update referenced a document that does not exist.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// A document could not be encoded or decoded.
    #[error("Document serialization failed: {0}")]
    Serialization(String),

    /// Internal/unexpected store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
