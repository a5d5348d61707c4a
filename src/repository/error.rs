// ==========================================
// Class Assign - repository error type
// ==========================================
// thiserror derive; rusqlite errors mapped by message
// ==========================================

use thiserror::Error;

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== database =====
    #[error("record not found: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database lock failed: {0}")]
    LockError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    #[error("constraint violated: {0}")]
    ConstraintViolation(String),

    // ===== stored data =====
    #[error("stored value unreadable (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg))
                if msg.contains("UNIQUE") || msg.contains("CHECK") || msg.contains("FOREIGN KEY") =>
            {
                RepositoryError::ConstraintViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;
