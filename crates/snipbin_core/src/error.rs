//! Application error types for storage and domain logic.

use thiserror::Error;

/// Errors surfaced by a [`crate::store::PasteStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Paste id already exists")]
    AlreadyExists,

    #[error("Store capacity exceeded")]
    CapacityExceeded,

    #[error("Backend error: {0}")]
    Backend(#[from] redb::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(value: redb::TableError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(value: redb::StorageError) -> Self {
        Self::Backend(value.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(value: redb::CommitError) -> Self {
        Self::Backend(value.into())
    }
}

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Content too large: maximum is {0} characters")]
    ContentTooLarge(usize),

    #[error("Not found")]
    NotFound,

    #[error("Failed to allocate a unique paste id")]
    IdentifierExhausted,

    #[error("Storage is at capacity")]
    CapacityExceeded,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error")]
    Internal,
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::CapacityExceeded => Self::CapacityExceeded,
            // Insert races are resolved by the service's retry loop; one
            // escaping here means the loop is already exhausted.
            StoreError::AlreadyExists => Self::Storage("insert raced an existing id".to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}
