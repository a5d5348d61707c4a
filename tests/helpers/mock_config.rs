// ==========================================
// Fixed in-memory settings for tests
// ==========================================

use class_assign::config::SettingsReader;
use class_assign::domain::settings::{AssignmentConfig, ReportMeta};
use class_assign::domain::types::AssignmentMethod;
use std::error::Error;

#[derive(Debug, Clone, Default)]
pub struct MockSettings {
    pub config: AssignmentConfig,
    pub meta: ReportMeta,
}

impl MockSettings {
    pub fn new(total_current_classes: u32, total_new_classes: u32, method: AssignmentMethod) -> Self {
        Self {
            config: AssignmentConfig {
                total_current_classes,
                total_new_classes,
                assignment_method: method,
            },
            meta: ReportMeta::default(),
        }
    }

    pub fn with_teacher(mut self, name: &str) -> Self {
        self.meta.teacher_name = name.to_string();
        self
    }
}

impl SettingsReader for MockSettings {
    fn get_assignment_config(&self) -> Result<AssignmentConfig, Box<dyn Error>> {
        Ok(self.config)
    }

    fn get_report_meta(&self) -> Result<ReportMeta, Box<dyn Error>> {
        Ok(self.meta.clone())
    }
}
