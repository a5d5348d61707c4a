// ==========================================
// Class Assign - importer error type
// ==========================================
// thiserror derive; csv/calamine/io/rusqlite errors folded in
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Importer errors
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (expected .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== content =====
    #[error("target class out of range: {class} (expected 1..={max})")]
    InvalidTargetClass { class: u32, max: u32 },

    #[error("no student rows recognized ({skipped} lines skipped)")]
    NoRecognizedRows { skipped: usize },

    // ===== storage =====
    #[error("database write failed: {0}")]
    DatabaseError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
