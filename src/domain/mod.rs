// ==========================================
// Class Assign - domain layer
// ==========================================
// Entities and value types only; no data access, no engine logic
// ==========================================

pub mod action_log;
pub mod assignment;
pub mod settings;
pub mod student;
pub mod types;

pub use action_log::{ActionLog, ActionType};
pub use assignment::{
    AssignmentResult, DestinationStats, ExcludedReason, ExcludedRecord, RosterSummary,
};
pub use settings::{AssignmentConfig, ReportMeta, RosterSnapshot};
pub use student::{AssignedStudent, NewStudent, StudentPatch, StudentRecord};
pub use types::{AssignmentMethod, DestinationCode, Gender, DESTINATION_LABELS, MAX_CLASSES};
