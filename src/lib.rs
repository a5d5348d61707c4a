// ==========================================
// Class Assign - core library
// ==========================================
// Next-year class reassignment: partition by origin class and
// gender, rank, then deal students across the new classes
// Stack: Rust + SQLite
// ==========================================

rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// Modules
// ==========================================

// domain - entities and value types
pub mod domain;

// repository - data access
pub mod repository;

// engine - assignment rules
pub mod engine;

// importer - pasted text and spreadsheet files
pub mod importer;

// config - persisted settings
pub mod config;

// report - printable views and CSV export
pub mod report;

// database bootstrap (PRAGMAs, schema)
pub mod db;

pub mod logging;

pub mod i18n;

// per-operation timing and SQL counts
pub mod perf;

// API - caller-facing operations
pub mod api;

// app - wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{AssignmentMethod, DestinationCode, Gender};

pub use domain::{
    ActionLog, ActionType, AssignedStudent, AssignmentConfig, AssignmentResult, DestinationStats,
    NewStudent, ReportMeta, RosterSnapshot, RosterSummary, StudentPatch, StudentRecord,
};

pub use engine::{AssignmentEngine, EngineError};

pub use api::{ApiError, AssignmentApi, ConfigApi, RosterApi};

pub use report::{AssignmentReport, ReportBuilder};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "반편성 도우미";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
