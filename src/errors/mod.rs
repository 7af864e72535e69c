// Errors layer - Error type definitions

pub mod storage;

pub use storage::StorageError;

use thiserror::Error;

/// Domain error for review, audit, and statistics operations
///
/// The first three kinds are domain outcomes: they are returned to the
/// immediate caller and never retried internally. `Storage` wraps an
/// infrastructure failure and is the only retryable kind.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> CoreError {
        CoreError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> CoreError {
        CoreError::NotFound { entity, id: id.into() }
    }

    pub fn conflict(message: impl Into<String>) -> CoreError {
        CoreError::Conflict(message.into())
    }

    pub fn database(operation: &str, source: sea_orm::DbErr) -> CoreError {
        CoreError::Storage(StorageError::database(operation, source))
    }
}
