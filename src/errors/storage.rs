use thiserror::Error;

/// Infrastructure failure in the persistence layer or the queue backend
///
/// Distinguished from the domain kinds in [`CoreError`](super::CoreError)
/// because callers may retry it; the `operation` label identifies the code
/// path that failed.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error during {operation}: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Queue error during {operation}: {message}")]
    Queue {
        operation: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StorageError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> StorageError {
        StorageError::Database {
            operation: operation.to_string(),
            source,
        }
    }

    pub fn queue(operation: &str, message: impl Into<String>) -> StorageError {
        StorageError::Queue {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}
