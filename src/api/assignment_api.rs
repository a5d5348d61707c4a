// ==========================================
// Class Assign - assignment API
// ==========================================
// Loads roster + settings, runs the engine, builds reports
// Read-only: nothing here writes to the store
// ==========================================

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::config::SettingsReader;
use crate::domain::assignment::{AssignmentResult, RosterSummary};
use crate::engine::AssignmentEngine;
use crate::perf::PerfGuard;
use crate::report::{self, AssignmentReport, ReportBuilder};
use crate::repository::StudentRepository;

pub struct AssignmentApi {
    student_repo: Arc<StudentRepository>,
    settings: Arc<dyn SettingsReader>,
    engine: Arc<AssignmentEngine>,
}

impl AssignmentApi {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        settings: Arc<dyn SettingsReader>,
        engine: Arc<AssignmentEngine>,
    ) -> Self {
        Self {
            student_repo,
            settings,
            engine,
        }
    }

    /// Fresh result from the current roster and settings
    pub fn recompute(&self) -> ApiResult<AssignmentResult> {
        let _perf = PerfGuard::new("assignment.recompute");
        let config = self
            .settings
            .get_assignment_config()
            .map_err(config_error)?;
        let roster = self.student_repo.list_all()?;

        let result = self.engine.recompute(&roster, &config)?;
        if !result.stale_overrides.is_empty() {
            warn!(
                count = result.stale_overrides.len(),
                "stale overrides ignored during recompute"
            );
        }
        Ok(result)
    }

    /// Headline counts over the stored roster
    pub fn summary(&self) -> ApiResult<RosterSummary> {
        let roster = self.student_repo.list_all()?;
        Ok(RosterSummary::from_students(&roster))
    }

    /// Recompute and lay out the printable report
    pub fn build_report(&self) -> ApiResult<AssignmentReport> {
        let _perf = PerfGuard::new("assignment.build_report");
        let config = self
            .settings
            .get_assignment_config()
            .map_err(config_error)?;
        let meta = self.settings.get_report_meta().map_err(config_error)?;
        let roster = self.student_repo.list_all()?;

        let result = self.engine.recompute(&roster, &config)?;
        Ok(ReportBuilder::build(&result, &roster, &config, &meta))
    }

    /// Write the report as CSV
    pub fn export_report_csv(&self, path: &Path) -> ApiResult<AssignmentReport> {
        let built = self.build_report()?;
        report::export_to_path(&built, path)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        info!(path = %path.display(), "report exported");
        Ok(built)
    }
}
