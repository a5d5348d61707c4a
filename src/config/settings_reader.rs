// ==========================================
// Class Assign - settings reader trait
// ==========================================
// Read side of the config layer; lets the API run against a
// fixed in-memory config in tests
// ==========================================

use crate::domain::settings::{AssignmentConfig, ReportMeta};
use std::error::Error;

pub trait SettingsReader: Send + Sync {
    /// Engine input (defaults: 5 current, 4 new, staggered)
    fn get_assignment_config(&self) -> Result<AssignmentConfig, Box<dyn Error>>;

    /// Report header (defaults: 2025, grade 1, no teacher name)
    fn get_report_meta(&self) -> Result<ReportMeta, Box<dyn Error>>;
}
