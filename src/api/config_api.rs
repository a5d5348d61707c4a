// ==========================================
// Class Assign - config API
// ==========================================
// Assignment settings and report header settings
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::api::error::{config_error, ApiResult};
use crate::api::validator::RosterValidator;
use crate::config::{ConfigManager, SettingsReader};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::settings::{AssignmentConfig, ReportMeta};
use crate::repository::{ActionLogRepository, StudentRepository};

/// Result of a settings change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdateReport {
    pub config: AssignmentConfig,
    pub cleared_overrides: usize, // pins that fell outside the new destination range
}

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
    student_repo: Arc<StudentRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    actor: String,
}

impl ConfigApi {
    pub fn new(
        config_manager: Arc<ConfigManager>,
        student_repo: Arc<StudentRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            config_manager,
            student_repo,
            action_log_repo,
            actor: actor.into(),
        }
    }

    pub fn get_assignment_config(&self) -> ApiResult<AssignmentConfig> {
        self.config_manager
            .get_assignment_config()
            .map_err(config_error)
    }

    /// Validate and store; shrinking the destination count clears stale pins
    pub fn update_assignment_config(
        &self,
        config: AssignmentConfig,
    ) -> ApiResult<ConfigUpdateReport> {
        RosterValidator::validate_config(&config)?;
        let previous = self.get_assignment_config()?;

        // pin cleanup and the settings write commit together
        let cleared_overrides = if config.total_new_classes < previous.total_new_classes {
            self.student_repo
                .clear_manual_classes_beyond_with(config.total_new_classes, |tx| {
                    ConfigManager::write_assignment_config_tx(tx, &config)?;
                    Ok(())
                })?
        } else {
            self.config_manager
                .update_assignment_config(&config)
                .map_err(config_error)?;
            0
        };

        self.action_log_repo.insert(
            &ActionLog::new(ActionType::UpdateConfig, &self.actor).with_payload(json!({
                "before": previous,
                "after": config,
                "cleared_overrides": cleared_overrides,
            })),
        )?;

        info!(
            total_current_classes = config.total_current_classes,
            total_new_classes = config.total_new_classes,
            method = %config.assignment_method,
            cleared_overrides,
            "assignment config updated"
        );

        Ok(ConfigUpdateReport {
            config,
            cleared_overrides,
        })
    }

    pub fn get_report_meta(&self) -> ApiResult<ReportMeta> {
        self.config_manager.get_report_meta().map_err(config_error)
    }

    pub fn update_report_meta(&self, meta: ReportMeta) -> ApiResult<ReportMeta> {
        let meta = ReportMeta {
            teacher_name: meta.teacher_name.trim().to_string(),
            ..meta
        };
        self.config_manager
            .update_report_meta(&meta)
            .map_err(config_error)?;

        self.action_log_repo.insert(
            &ActionLog::new(ActionType::UpdateConfig, &self.actor)
                .with_payload(json!(meta))
                .with_detail("report meta"),
        )?;
        Ok(meta)
    }
}
