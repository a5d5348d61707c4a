// ==========================================
// Class Assign - assignment result model
// ==========================================
// Engine output; recomputed on demand, never persisted
// ==========================================

use crate::domain::student::{AssignedStudent, StudentRecord};
use crate::domain::types::{DestinationCode, Gender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// DestinationStats - per new class tallies
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationStats {
    pub male: u32,
    pub female: u32,
    pub total: u32,
    pub transfer: u32,
    pub by_original_class: BTreeMap<u32, u32>, // origin class → count
}

impl DestinationStats {
    /// Zeroed stats with every origin class pre-seeded
    pub fn seeded(total_current_classes: u32) -> Self {
        Self {
            by_original_class: (1..=total_current_classes).map(|c| (c, 0)).collect(),
            ..Default::default()
        }
    }

    pub fn count_gender(&self, gender: Gender) -> u32 {
        match gender {
            Gender::M => self.male,
            Gender::F => self.female,
        }
    }
}

// ==========================================
// ExcludedRecord - rows left out of grouping
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExcludedReason {
    BlankName,
    OriginClassOutOfRange,
}

impl fmt::Display for ExcludedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExcludedReason::BlankName => write!(f, "BLANK_NAME"),
            ExcludedReason::OriginClassOutOfRange => write!(f, "ORIGIN_CLASS_OUT_OF_RANGE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    pub student_id: i64,
    pub original_class: u32,
    pub reason: ExcludedReason,
}

// ==========================================
// AssignmentResult
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Origin class ascending; within a class boys then girls, each in sort order
    pub assigned: Vec<AssignedStudent>,
    /// One entry per destination code in use, empty classes included
    pub stats: BTreeMap<DestinationCode, DestinationStats>,
    pub excluded: Vec<ExcludedRecord>,
    /// Students whose pin points past total_new_classes (ignored)
    pub stale_overrides: Vec<i64>,
}

impl AssignmentResult {
    pub fn find(&self, student_id: i64) -> Option<&AssignedStudent> {
        self.assigned.iter().find(|s| s.student.id == student_id)
    }

    pub fn members_of(&self, code: DestinationCode) -> impl Iterator<Item = &AssignedStudent> {
        self.assigned.iter().filter(move |s| s.new_class == code)
    }

    pub fn total_assigned(&self) -> u32 {
        self.stats.values().map(|s| s.total).sum()
    }
}

// ==========================================
// RosterSummary - headline counts for the result tab
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: u32,
    pub male: u32,
    pub female: u32,
    pub transfer: u32,
    pub manual: u32,
    pub by_original_class: BTreeMap<u32, u32>,
}

impl RosterSummary {
    /// Counts over the whole roster, blank rows included
    pub fn from_students(students: &[StudentRecord]) -> Self {
        let mut summary = RosterSummary::default();
        for student in students {
            summary.total += 1;
            match student.gender {
                Gender::M => summary.male += 1,
                Gender::F => summary.female += 1,
            }
            if student.is_transfer {
                summary.transfer += 1;
            }
            if student.manual_class.is_some() {
                summary.manual += 1;
            }
            *summary
                .by_original_class
                .entry(student.original_class)
                .or_insert(0) += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let base = StudentRecord {
            id: 1,
            name: "김민수".to_string(),
            gender: Gender::M,
            rank: 1,
            note: String::new(),
            is_transfer: false,
            original_class: 1,
            manual_class: None,
        };
        let girl = StudentRecord {
            id: 2,
            gender: Gender::F,
            is_transfer: true,
            original_class: 2,
            manual_class: DestinationCode::from_index(1),
            ..base.clone()
        };

        let summary = RosterSummary::from_students(&[base, girl]);

        assert_eq!(summary.total, 2);
        assert_eq!((summary.male, summary.female), (1, 1));
        assert_eq!(summary.transfer, 1);
        assert_eq!(summary.manual, 1);
        assert_eq!(summary.by_original_class.get(&2), Some(&1));
    }
}
