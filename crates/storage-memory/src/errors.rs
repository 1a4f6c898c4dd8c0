//! Storage-specific error types.
//!
//! This module provides error types internal to the storage layer; they
//! are converted to the store-agnostic `instep_core` error types before
//! being returned to callers.

use instep_core::errors::{Error, StoreError};
use thiserror::Error;

/// Errors raised by the document store engine and repositories.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A targeted update addressed a document that does not exist.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// A document failed to encode or decode.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DocumentNotFound(path) => {
                Error::Store(StoreError::DocumentNotFound(path))
            }
            StorageError::Serialization(e) => {
                Error::Store(StoreError::Serialization(e.to_string()))
            }
        }
    }
}
