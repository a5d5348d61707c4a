// ==========================================
// Class Assign - action log model
// ==========================================
// Every roster/config write leaves an audit row
// ==========================================

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

// ==========================================
// ActionLog
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,               // uuid v4
    pub action_type: ActionType,
    pub action_ts: NaiveDateTime,
    pub actor: String,
    pub student_id: Option<i64>,          // None for bulk/config actions
    pub payload_json: Option<JsonValue>,
    pub detail: Option<String>,
}

impl ActionLog {
    pub fn new(action_type: ActionType, actor: &str) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts: Local::now().naive_local(),
            actor: actor.to_string(),
            student_id: None,
            payload_json: None,
            detail: None,
        }
    }

    pub fn with_student(mut self, student_id: i64) -> Self {
        self.student_id = Some(student_id);
        self
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ==========================================
// ActionType
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AddStudent,
    UpdateStudent,
    RemoveStudent,
    Import,
    SetOverride,
    ClearOverrides,
    UpdateConfig,
    RestoreSnapshot,
    ClearAll,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionType::AddStudent => "ADD_STUDENT",
            ActionType::UpdateStudent => "UPDATE_STUDENT",
            ActionType::RemoveStudent => "REMOVE_STUDENT",
            ActionType::Import => "IMPORT",
            ActionType::SetOverride => "SET_OVERRIDE",
            ActionType::ClearOverrides => "CLEAR_OVERRIDES",
            ActionType::UpdateConfig => "UPDATE_CONFIG",
            ActionType::RestoreSnapshot => "RESTORE_SNAPSHOT",
            ActionType::ClearAll => "CLEAR_ALL",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD_STUDENT" => Ok(ActionType::AddStudent),
            "UPDATE_STUDENT" => Ok(ActionType::UpdateStudent),
            "REMOVE_STUDENT" => Ok(ActionType::RemoveStudent),
            "IMPORT" => Ok(ActionType::Import),
            "SET_OVERRIDE" => Ok(ActionType::SetOverride),
            "CLEAR_OVERRIDES" => Ok(ActionType::ClearOverrides),
            "UPDATE_CONFIG" => Ok(ActionType::UpdateConfig),
            "RESTORE_SNAPSHOT" => Ok(ActionType::RestoreSnapshot),
            "CLEAR_ALL" => Ok(ActionType::ClearAll),
            other => Err(format!("unknown action type: {}", other)),
        }
    }
}
