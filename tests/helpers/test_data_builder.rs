// ==========================================
// Test data builders
// ==========================================

use class_assign::domain::student::{NewStudent, StudentRecord};
use class_assign::domain::types::{DestinationCode, Gender};

// ==========================================
// StudentBuilder
// ==========================================

pub struct StudentBuilder {
    id: i64,
    name: String,
    gender: Gender,
    rank: u32,
    note: String,
    is_transfer: bool,
    original_class: u32,
    manual_class: Option<DestinationCode>,
}

impl StudentBuilder {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            gender: Gender::M,
            rank: 0,
            note: String::new(),
            is_transfer: false,
            original_class: 1,
            manual_class: None,
        }
    }

    pub fn girl(mut self) -> Self {
        self.gender = Gender::F;
        self
    }

    pub fn rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn class(mut self, original_class: u32) -> Self {
        self.original_class = original_class;
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = note.to_string();
        self
    }

    pub fn transfer(mut self) -> Self {
        self.is_transfer = true;
        self
    }

    pub fn pinned(mut self, label: &str) -> Self {
        self.manual_class = DestinationCode::from_label(label);
        self
    }

    pub fn build(self) -> StudentRecord {
        StudentRecord {
            id: self.id,
            name: self.name,
            gender: self.gender,
            rank: self.rank,
            note: self.note,
            is_transfer: self.is_transfer,
            original_class: self.original_class,
            manual_class: self.manual_class,
        }
    }

    /// Insert payload (id and pin are dropped)
    pub fn build_new(self) -> NewStudent {
        NewStudent {
            name: self.name,
            gender: self.gender,
            rank: self.rank,
            note: self.note,
            is_transfer: self.is_transfer,
            original_class: self.original_class,
        }
    }
}

/// `boys` boys then `girls` girls per class, ranked 1.. within each gender
pub fn uniform_roster(classes: u32, boys: u32, girls: u32) -> Vec<StudentRecord> {
    let mut roster = Vec::new();
    let mut id = 1;
    for class in 1..=classes {
        for rank in 1..=boys {
            roster.push(
                StudentBuilder::new(id, &format!("남{}-{:02}", class, rank))
                    .class(class)
                    .rank(rank)
                    .build(),
            );
            id += 1;
        }
        for rank in 1..=girls {
            roster.push(
                StudentBuilder::new(id, &format!("여{}-{:02}", class, rank))
                    .girl()
                    .class(class)
                    .rank(rank)
                    .build(),
            );
            id += 1;
        }
    }
    roster
}
