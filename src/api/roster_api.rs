// ==========================================
// Class Assign - roster API
// ==========================================
// Student CRUD, manual overrides, import, snapshot/restore
// Every mutation writes an ActionLog row
// ==========================================

use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{config_error, ApiError, ApiResult};
use crate::api::validator::RosterValidator;
use crate::config::{ConfigManager, SettingsReader};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::settings::RosterSnapshot;
use crate::domain::student::{NewStudent, StudentPatch, StudentRecord};
use crate::domain::types::MAX_CLASSES;
use crate::importer::{ImportReport, RosterImporter};
use crate::perf::PerfGuard;
use crate::repository::{ActionLogRepository, StudentRepository};

pub struct RosterApi {
    student_repo: Arc<StudentRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    config_manager: Arc<ConfigManager>,
    importer: Arc<RosterImporter>,
    actor: String,
}

impl RosterApi {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        config_manager: Arc<ConfigManager>,
        importer: Arc<RosterImporter>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            student_repo,
            action_log_repo,
            config_manager,
            importer,
            actor: actor.into(),
        }
    }

    fn log(&self, log: ActionLog) -> ApiResult<()> {
        self.action_log_repo.insert(&log)?;
        Ok(())
    }

    /// Origin classes currently configured; new rows must land in 1..=this
    fn configured_classes(&self) -> ApiResult<u32> {
        let config = self
            .config_manager
            .get_assignment_config()
            .map_err(config_error)?;
        Ok(config.total_current_classes)
    }

    fn require_student(&self, id: i64) -> ApiResult<StudentRecord> {
        self.student_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Student(id={})", id)))
    }

    // ==========================================
    // Queries
    // ==========================================

    pub fn get_student(&self, id: i64) -> ApiResult<StudentRecord> {
        self.require_student(id)
    }

    /// Whole roster, or one origin class
    pub fn list_students(&self, original_class: Option<u32>) -> ApiResult<Vec<StudentRecord>> {
        let _perf = PerfGuard::new("roster.list_students");
        match original_class {
            Some(class) => {
                RosterValidator::validate_original_class(class)?;
                Ok(self.student_repo.list_by_class(class)?)
            }
            None => Ok(self.student_repo.list_all()?),
        }
    }

    /// Student count per origin class, zero-filled for 1..=9
    pub fn class_counts(&self) -> ApiResult<BTreeMap<u32, u32>> {
        let stored = self.student_repo.count_by_class()?;
        Ok((1..=MAX_CLASSES)
            .map(|class| (class, stored.get(&class).copied().unwrap_or(0)))
            .collect())
    }

    // ==========================================
    // Student edits
    // ==========================================

    pub fn add_student(&self, student: NewStudent) -> ApiResult<i64> {
        RosterValidator::validate_new_student(&student, self.configured_classes()?)?;

        let id = self.student_repo.insert(&student)?;
        self.log(
            ActionLog::new(ActionType::AddStudent, &self.actor)
                .with_student(id)
                .with_payload(json!(student)),
        )?;

        info!(student_id = id, original_class = student.original_class, "student added");
        Ok(id)
    }

    /// Empty grid row for `original_class`
    pub fn add_blank_student(&self, original_class: u32) -> ApiResult<i64> {
        RosterValidator::validate_target_class(original_class, self.configured_classes()?)?;

        let student = NewStudent::blank(original_class);
        let id = self.student_repo.insert(&student)?;
        self.log(
            ActionLog::new(ActionType::AddStudent, &self.actor)
                .with_student(id)
                .with_detail("blank row"),
        )?;
        Ok(id)
    }

    pub fn remove_student(&self, id: i64) -> ApiResult<StudentRecord> {
        let existing = self.require_student(id)?;

        self.student_repo.delete(id)?;
        self.log(
            ActionLog::new(ActionType::RemoveStudent, &self.actor)
                .with_student(id)
                .with_payload(json!(existing)),
        )?;

        info!(student_id = id, "student removed");
        Ok(existing)
    }

    pub fn update_student(&self, id: i64, patch: StudentPatch) -> ApiResult<StudentRecord> {
        RosterValidator::validate_patch(&patch)?;
        let mut student = self.require_student(id)?;
        if patch.is_empty() {
            return Ok(student);
        }

        patch.apply_to(&mut student);
        self.student_repo.update(&student)?;
        self.log(
            ActionLog::new(ActionType::UpdateStudent, &self.actor)
                .with_student(id)
                .with_payload(json!(patch)),
        )?;
        Ok(student)
    }

    // ==========================================
    // Manual overrides
    // ==========================================

    /// Pin a student to a destination label; None or blank clears the pin
    pub fn set_manual_override(&self, id: i64, label: Option<&str>) -> ApiResult<StudentRecord> {
        let config = self
            .config_manager
            .get_assignment_config()
            .map_err(config_error)?;
        let code = RosterValidator::parse_override(id, label, config.total_new_classes)?;
        let mut student = self.require_student(id)?;

        self.student_repo.set_manual_class(id, code)?;
        self.log(
            ActionLog::new(ActionType::SetOverride, &self.actor)
                .with_student(id)
                .with_payload(json!({
                    "from": student.manual_class,
                    "to": code,
                })),
        )?;

        info!(student_id = id, manual_class = ?code.map(|c| c.label()), "override set");
        student.manual_class = code;
        Ok(student)
    }

    pub fn clear_all_manual_overrides(&self) -> ApiResult<usize> {
        let cleared = self.student_repo.clear_all_manual_classes()?;
        self.log(
            ActionLog::new(ActionType::ClearOverrides, &self.actor)
                .with_payload(json!({ "cleared": cleared })),
        )?;

        info!(cleared, "all overrides cleared");
        Ok(cleared)
    }

    // ==========================================
    // Import
    // ==========================================

    pub fn import_bulk_text(&self, text: &str, target_class: u32) -> ApiResult<ImportReport> {
        let _perf = PerfGuard::new("roster.import_bulk_text");
        RosterValidator::validate_target_class(target_class, self.configured_classes()?)?;
        Ok(self.importer.import_text(text, target_class, &self.actor)?)
    }

    pub fn import_file(&self, path: &Path, target_class: u32) -> ApiResult<ImportReport> {
        let _perf = PerfGuard::new("roster.import_file");
        RosterValidator::validate_target_class(target_class, self.configured_classes()?)?;
        Ok(self.importer.import_file(path, target_class, &self.actor)?)
    }

    // ==========================================
    // Snapshot / restore
    // ==========================================

    pub fn export_snapshot(&self) -> ApiResult<RosterSnapshot> {
        Ok(RosterSnapshot {
            config: self
                .config_manager
                .get_assignment_config()
                .map_err(config_error)?,
            meta: self.config_manager.get_report_meta().map_err(config_error)?,
            students: self.student_repo.list_all()?,
        })
    }

    pub fn snapshot_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.export_snapshot()?)?)
    }

    /// Replace roster and settings with the snapshot contents
    pub fn restore_snapshot(&self, snapshot: RosterSnapshot) -> ApiResult<usize> {
        let _perf = PerfGuard::new("roster.restore_snapshot");
        RosterValidator::validate_config(&snapshot.config)?;
        for student in &snapshot.students {
            RosterValidator::validate_original_class(student.original_class)?;
        }

        // pins beyond the restored destination count are dropped
        let mut students = snapshot.students;
        let mut dropped_pins = 0;
        for student in students.iter_mut() {
            if let Some(code) = student.manual_class {
                if !code.is_within(snapshot.config.total_new_classes) {
                    student.manual_class = None;
                    dropped_pins += 1;
                }
            }
        }
        if dropped_pins > 0 {
            warn!(dropped_pins, "snapshot overrides outside destination range dropped");
        }

        // roster and settings commit together
        let restored = self.student_repo.replace_all_with(&students, |tx| {
            ConfigManager::write_assignment_config_tx(tx, &snapshot.config)?;
            ConfigManager::write_report_meta_tx(tx, &snapshot.meta)?;
            Ok(())
        })?;

        self.log(
            ActionLog::new(ActionType::RestoreSnapshot, &self.actor).with_payload(json!({
                "students": restored,
                "dropped_pins": dropped_pins,
                "config": snapshot.config,
            })),
        )?;

        info!(students = restored, "snapshot restored");
        Ok(restored)
    }

    pub fn restore_snapshot_json(&self, snapshot_json: &str) -> ApiResult<usize> {
        let snapshot: RosterSnapshot = serde_json::from_str(snapshot_json)?;
        self.restore_snapshot(snapshot)
    }

    /// Empty the roster and reset settings; the action log is kept
    pub fn clear_all_data(&self) -> ApiResult<usize> {
        let removed = self.student_repo.delete_all()?;
        self.config_manager.reset_to_defaults().map_err(config_error)?;

        self.log(
            ActionLog::new(ActionType::ClearAll, &self.actor)
                .with_payload(json!({ "removed_students": removed })),
        )?;

        warn!(removed, "all roster data cleared");
        Ok(removed)
    }
}
