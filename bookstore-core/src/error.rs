//! Error types and result types for book store operations.
//!
//! Every backend reports failures through [`BookStoreError`]; the HTTP layer maps each
//! variant onto a status code. Use [`BookStoreResult<T>`] as the return type for
//! fallible operations.

use std::time::Duration;

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a book store.
#[derive(Error, Debug)]
pub enum BookStoreError {
    /// The caller supplied a malformed request, such as an empty search keyword.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The identifier does not satisfy the backend's identifier format.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// No book exists with the given identifier.
    #[error("Book not found: {0}")]
    NotFound(String),
    /// A backend call exceeded its deadline.
    /// The first argument names the operation, the second is the deadline that elapsed.
    #[error("Operation {0} timed out after {1:?}")]
    Timeout(String, Duration),
    /// An I/O or connectivity failure in the underlying storage.
    #[error("Storage error: {0}")]
    Storage(String),
    /// Serialization/deserialization error when converting between formats (JSON, BSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// An unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A specialized `Result` type for book store operations.
pub type BookStoreResult<T> = Result<T, BookStoreError>;

impl From<std::io::Error> for BookStoreError {
    fn from(err: std::io::Error) -> Self {
        BookStoreError::Storage(err.to_string())
    }
}

impl From<BsonError> for BookStoreError {
    fn from(err: BsonError) -> Self {
        BookStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for BookStoreError {
    fn from(err: SerdeJsonError) -> Self {
        BookStoreError::Serialization(err.to_string())
    }
}
