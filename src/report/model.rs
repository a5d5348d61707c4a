// ==========================================
// Class Assign - report model
// ==========================================
// Labels are resolved at build time in the current locale
// ==========================================

use crate::domain::settings::ReportMeta;
use crate::domain::types::{AssignmentMethod, DestinationCode, Gender};
use serde::{Deserialize, Serialize};

// ==========================================
// Statistics table
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRow {
    pub label: String,
    pub male: u32,
    pub female: u32,
    pub total: u32,
}

impl StatRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn add(&mut self, gender: Gender, count: u32) {
        match gender {
            Gender::M => self.male += count,
            Gender::F => self.female += count,
        }
        self.total += count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsTable {
    pub before: Vec<StatRow>, // one per origin class
    pub before_total: StatRow,
    pub after: Vec<StatRow>, // one per destination
    pub after_total: StatRow,
}

// ==========================================
// Origin class sheet
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRow {
    pub seq: u32,
    pub student_id: i64,
    pub name: String,
    pub new_class: String, // label, "*" appended when pinned
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginClassSheet {
    pub origin_class: u32,
    pub title: String,
    pub boys: Vec<OriginRow>,
    pub girls: Vec<OriginRow>,
}

// ==========================================
// Destination roster
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRow {
    pub seq: u32,
    pub student_id: i64,
    pub name: String,
    pub gender: String,
    pub origin_class: u32,
    pub remark: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRoster {
    pub code: DestinationCode,
    pub title: String,
    pub rows: Vec<DestinationRow>,
}

// ==========================================
// AssignmentReport
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReport {
    pub title: String,
    pub meta: ReportMeta,
    pub method: AssignmentMethod,
    pub statistics: StatisticsTable,
    pub origin_sheets: Vec<OriginClassSheet>,
    pub destination_rosters: Vec<DestinationRoster>,
}
