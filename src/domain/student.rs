// ==========================================
// Class Assign - student domain model
// ==========================================
// StudentRecord: roster row (owned by the store, read-only to the engine)
// AssignedStudent: engine output row, recomputed on demand
// ==========================================

use crate::domain::types::{DestinationCode, Gender};
use serde::{Deserialize, Serialize};

// ==========================================
// StudentRecord - roster row
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: i64,                              // primary key (assigned by the store)
    pub name: String,                         // 성명
    pub gender: Gender,                       // 성별
    pub rank: u32,                            // 석차, 0 = unranked
    #[serde(default)]
    pub note: String,                         // 비고
    #[serde(default)]
    pub is_transfer: bool,                    // 전출예정
    pub original_class: u32,                  // current class, 1-based
    #[serde(default)]
    pub manual_class: Option<DestinationCode>, // operator pin
}

impl StudentRecord {
    /// Blank names are kept on the roster but never assigned
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

// ==========================================
// NewStudent - insert payload
// ==========================================
// New rows never carry an override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub gender: Gender,
    pub rank: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_transfer: bool,
    pub original_class: u32,
}

impl NewStudent {
    /// Empty row for the input grid (이름 없음, 남, 석차 0)
    pub fn blank(original_class: u32) -> Self {
        Self {
            name: String::new(),
            gender: Gender::M,
            rank: 0,
            note: String::new(),
            is_transfer: false,
            original_class,
        }
    }
}

// ==========================================
// StudentPatch - partial field edit
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub rank: Option<u32>,
    pub note: Option<String>,
    pub is_transfer: Option<bool>,
    pub original_class: Option<u32>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.rank.is_none()
            && self.note.is_none()
            && self.is_transfer.is_none()
            && self.original_class.is_none()
    }

    /// Apply the patch onto a record in place
    pub fn apply_to(&self, record: &mut StudentRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(rank) = self.rank {
            record.rank = rank;
        }
        if let Some(note) = &self.note {
            record.note = note.clone();
        }
        if let Some(is_transfer) = self.is_transfer {
            record.is_transfer = is_transfer;
        }
        if let Some(original_class) = self.original_class {
            record.original_class = original_class;
        }
    }
}

// ==========================================
// AssignedStudent - engine output row
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedStudent {
    #[serde(flatten)]
    pub student: StudentRecord,
    pub auto_class: DestinationCode, // offset algorithm result
    pub new_class: DestinationCode,  // manual_class if applied, else auto_class
    pub is_manual: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> StudentRecord {
        StudentRecord {
            id: 7,
            name: "홍길동".to_string(),
            gender: Gender::M,
            rank: 3,
            note: String::new(),
            is_transfer: false,
            original_class: 2,
            manual_class: None,
        }
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut r = record();
        let patch = StudentPatch {
            rank: Some(1),
            is_transfer: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut r);

        assert_eq!(r.rank, 1);
        assert!(r.is_transfer);
        assert_eq!(r.name, "홍길동");
        assert_eq!(r.original_class, 2);
    }

    #[test]
    fn test_blank_name_is_not_eligible() {
        let mut r = record();
        assert!(r.has_name());
        r.name = "   ".to_string();
        assert!(!r.has_name());
    }

    #[test]
    fn test_record_deserializes_without_optional_fields() {
        let json = r#"{"id":1,"name":"김영희","gender":"F","rank":2,"original_class":1}"#;
        let r: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.gender, Gender::F);
        assert_eq!(r.manual_class, None);
        assert!(!r.is_transfer);
    }
}
