// ==========================================
// Class Assign - engine error type
// ==========================================

use thiserror::Error;

/// Engine errors; raised before any allocation work starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid configuration ({field}={value}): {reason}")]
    InvalidConfiguration {
        field: &'static str,
        value: i64,
        reason: String,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;
