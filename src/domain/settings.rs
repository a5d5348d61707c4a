// ==========================================
// Class Assign - configuration values
// ==========================================
// AssignmentConfig: engine input
// ReportMeta: report header only, never read by the engine
// RosterSnapshot: persistence blob {config, students}
// ==========================================

use crate::domain::student::StudentRecord;
use crate::domain::types::AssignmentMethod;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOTAL_CURRENT_CLASSES: u32 = 5;
pub const DEFAULT_TOTAL_NEW_CLASSES: u32 = 4;
pub const DEFAULT_SCHOOL_YEAR: i32 = 2025;
pub const DEFAULT_GRADE: u32 = 1;

// ==========================================
// AssignmentConfig
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentConfig {
    pub total_current_classes: u32, // origin classes, [1,9]
    pub total_new_classes: u32,     // destination classes, [2,9]
    #[serde(default)]
    pub assignment_method: AssignmentMethod,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            total_current_classes: DEFAULT_TOTAL_CURRENT_CLASSES,
            total_new_classes: DEFAULT_TOTAL_NEW_CLASSES,
            assignment_method: AssignmentMethod::Staggered,
        }
    }
}

// ==========================================
// ReportMeta
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub year: i32,            // current school year (학년도)
    pub grade: u32,           // current grade (학년)
    #[serde(default)]
    pub teacher_name: String, // 담임
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            year: DEFAULT_SCHOOL_YEAR,
            grade: DEFAULT_GRADE,
            teacher_name: String::new(),
        }
    }
}

// ==========================================
// RosterSnapshot
// ==========================================
// Opaque to the engine; used for backup/restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub config: AssignmentConfig,
    #[serde(default)]
    pub meta: ReportMeta,
    pub students: Vec<StudentRecord>,
}
