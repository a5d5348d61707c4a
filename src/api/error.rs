// ==========================================
// Class Assign - API error type
// ==========================================
// Folds repository/engine/import errors into caller-facing variants
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // input
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid override for student {student_id}: {reason}")]
    InvalidOverride { student_id: i64, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    // ==========================================
    // collaborators
    // ==========================================
    #[error("import failed: {0}")]
    ImportError(#[from] ImportError),

    #[error("config store error: {0}")]
    ConfigError(String),

    // ==========================================
    // storage
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("lock failed: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ConstraintViolation(msg) => ApiError::InvalidInput(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("stored field {} unreadable: {}", field, message))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::InvalidConfiguration(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

/// ConfigManager reports through Box<dyn Error>
pub(crate) fn config_error(err: Box<dyn std::error::Error>) -> ApiError {
    ApiError::ConfigError(err.to_string())
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_not_found_maps() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "Student".to_string(),
            id: "42".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "Student(id=42)"));
    }

    #[test]
    fn test_engine_error_maps_to_configuration() {
        let err: ApiError = EngineError::InvalidConfiguration {
            field: "total_new_classes",
            value: 0,
            reason: "must be at least 1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::InvalidConfiguration(_)));
    }
}
