// ==========================================
// Class Assign - partitioner
// ==========================================
// Input: roster + total_current_classes
// Output: per origin class, boys / girls (roster order, unsorted)
// Blank names and out-of-range origin classes are left out and reported
// ==========================================

use crate::domain::assignment::{ExcludedReason, ExcludedRecord};
use crate::domain::student::StudentRecord;
use crate::domain::types::Gender;

/// One origin class split by gender
#[derive(Debug, Clone, Default)]
pub struct OriginPartition<'a> {
    pub origin_class: u32,
    pub boys: Vec<&'a StudentRecord>,
    pub girls: Vec<&'a StudentRecord>,
}

impl<'a> OriginPartition<'a> {
    fn new(origin_class: u32) -> Self {
        Self {
            origin_class,
            boys: Vec::new(),
            girls: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.boys.len() + self.girls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct PartitionOutput<'a> {
    /// Index 0 holds origin class 1
    pub groups: Vec<OriginPartition<'a>>,
    pub excluded: Vec<ExcludedRecord>,
}

pub struct Partitioner;

impl Partitioner {
    pub fn partition(
        students: &[StudentRecord],
        total_current_classes: u32,
    ) -> PartitionOutput<'_> {
        let mut groups: Vec<OriginPartition<'_>> = (1..=total_current_classes)
            .map(OriginPartition::new)
            .collect();
        let mut excluded = Vec::new();

        for student in students {
            if student.original_class < 1 || student.original_class > total_current_classes {
                excluded.push(ExcludedRecord {
                    student_id: student.id,
                    original_class: student.original_class,
                    reason: ExcludedReason::OriginClassOutOfRange,
                });
                continue;
            }
            if !student.has_name() {
                excluded.push(ExcludedRecord {
                    student_id: student.id,
                    original_class: student.original_class,
                    reason: ExcludedReason::BlankName,
                });
                continue;
            }

            let group = &mut groups[(student.original_class - 1) as usize];
            match student.gender {
                Gender::M => group.boys.push(student),
                Gender::F => group.girls.push(student),
            }
        }

        PartitionOutput { groups, excluded }
    }
}
