//! Error types for the todo store and payload validation.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers map "the record does
//! not exist" to a different outcome than a driver fault. Every other
//! failure from the database lands in `Database` with the underlying
//! `sqlx::Error` preserved for logging.

/// Errors returned by `TodoStore` operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row with this id exists (never created, or already deleted).
    #[error("todo {0} not found")]
    NotFound(i64),

    /// Connection, disk or driver fault.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Errors returned by payload `validate` methods.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
}

pub type Result<T> = std::result::Result<T, StoreError>;
