// ==========================================
// Class Assign - input validator
// ==========================================
// Write-side checks shared by the roster and config APIs
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::settings::AssignmentConfig;
use crate::domain::student::{NewStudent, StudentPatch};
use crate::domain::types::{DestinationCode, MAX_CLASSES};

/// Smallest destination count the config accepts
pub const MIN_NEW_CLASSES: u32 = 2;

pub struct RosterValidator;

impl RosterValidator {
    pub fn validate_original_class(original_class: u32) -> ApiResult<()> {
        if original_class == 0 || original_class > MAX_CLASSES {
            return Err(ApiError::InvalidInput(format!(
                "original_class {} out of range 1..={}",
                original_class, MAX_CLASSES
            )));
        }
        Ok(())
    }

    /// New rows may only go into a class that currently exists
    pub fn validate_target_class(original_class: u32, total_current_classes: u32) -> ApiResult<()> {
        Self::validate_original_class(original_class)?;
        if original_class > total_current_classes {
            return Err(ApiError::InvalidInput(format!(
                "original_class {} exceeds the {} configured classes",
                original_class, total_current_classes
            )));
        }
        Ok(())
    }

    pub fn validate_new_student(student: &NewStudent, total_current_classes: u32) -> ApiResult<()> {
        if student.name.trim().is_empty() {
            return Err(ApiError::InvalidInput("name must not be blank".to_string()));
        }
        Self::validate_target_class(student.original_class, total_current_classes)
    }

    /// Grid edits may blank a name; only the class is range-checked
    pub fn validate_patch(patch: &StudentPatch) -> ApiResult<()> {
        match patch.original_class {
            Some(class) => Self::validate_original_class(class),
            None => Ok(()),
        }
    }

    /// Parse an override label against the current destination count
    ///
    /// `None` or a blank label clears the override.
    pub fn parse_override(
        student_id: i64,
        label: Option<&str>,
        total_new_classes: u32,
    ) -> ApiResult<Option<DestinationCode>> {
        let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) else {
            return Ok(None);
        };

        let code = DestinationCode::from_label(label).ok_or_else(|| ApiError::InvalidOverride {
            student_id,
            reason: format!("unknown class label '{}'", label),
        })?;

        if !code.is_within(total_new_classes) {
            return Err(ApiError::InvalidOverride {
                student_id,
                reason: format!(
                    "class {} is outside the {} configured classes",
                    code.label(),
                    total_new_classes
                ),
            });
        }

        Ok(Some(code))
    }

    pub fn validate_config(config: &AssignmentConfig) -> ApiResult<()> {
        if config.total_current_classes == 0 || config.total_current_classes > MAX_CLASSES {
            return Err(ApiError::InvalidConfiguration(format!(
                "total_current_classes {} out of range 1..={}",
                config.total_current_classes, MAX_CLASSES
            )));
        }
        if config.total_new_classes < MIN_NEW_CLASSES || config.total_new_classes > MAX_CLASSES {
            return Err(ApiError::InvalidConfiguration(format!(
                "total_new_classes {} out of range {}..={}",
                config.total_new_classes, MIN_NEW_CLASSES, MAX_CLASSES
            )));
        }
        Ok(())
    }
}
