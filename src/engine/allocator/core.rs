use super::offset::{start_index, target_index};
use crate::domain::settings::AssignmentConfig;
use crate::domain::student::{AssignedStudent, StudentRecord};
use crate::domain::types::{DestinationCode, Gender, DESTINATION_LABELS};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::ordering::StudentSorter;
use crate::engine::partition::OriginPartition;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct AllocationOutput {
    pub assigned: Vec<AssignedStudent>,
    pub stale_overrides: Vec<i64>,
}

// ==========================================
// Allocator
// ==========================================
pub struct Allocator {
    sorter: StudentSorter,
}

impl Allocator {
    pub fn new() -> Self {
        Self {
            sorter: StudentSorter::new(),
        }
    }

    /// Reject destination counts the alphabet cannot address
    ///
    /// Runs before any modulo arithmetic.
    pub fn check_destination_count(total_new_classes: u32) -> EngineResult<()> {
        if total_new_classes == 0 || total_new_classes as usize > DESTINATION_LABELS.len() {
            return Err(EngineError::InvalidConfiguration {
                field: "total_new_classes",
                value: total_new_classes as i64,
                reason: format!("must be within 1..={}", DESTINATION_LABELS.len()),
            });
        }
        Ok(())
    }

    /// Sort every partition, hand out slots, then resolve pins
    ///
    /// Output order: origin class ascending, boys before girls, each in sort order.
    pub fn allocate(
        &self,
        groups: &[OriginPartition<'_>],
        config: &AssignmentConfig,
    ) -> EngineResult<AllocationOutput> {
        Self::check_destination_count(config.total_new_classes)?;

        let mut output = AllocationOutput {
            assigned: Vec::with_capacity(groups.iter().map(|g| g.len()).sum()),
            stale_overrides: Vec::new(),
        };

        for group in groups {
            for (gender, members) in [(Gender::M, &group.boys), (Gender::F, &group.girls)] {
                let mut sorted = members.clone();
                self.sorter.sort(&mut sorted);
                self.allocate_partition(group.origin_class, gender, &sorted, config, &mut output)?;
            }
        }

        Ok(output)
    }

    fn allocate_partition(
        &self,
        origin_class: u32,
        gender: Gender,
        sorted: &[&StudentRecord],
        config: &AssignmentConfig,
        output: &mut AllocationOutput,
    ) -> EngineResult<()> {
        let k = config.total_new_classes;
        let method = config.assignment_method;
        let start = start_index(method, origin_class, gender, k);

        debug!(
            origin_class,
            gender = %gender,
            members = sorted.len(),
            start,
            method = %method,
            "allocating partition"
        );

        for (position, student) in sorted.iter().enumerate() {
            let t = target_index(method, origin_class, start, position, k);
            let auto_class = DestinationCode::from_index(t as usize).ok_or_else(|| {
                EngineError::InvalidConfiguration {
                    field: "total_new_classes",
                    value: k as i64,
                    reason: format!("slot {} has no destination code", t),
                }
            })?;

            let (new_class, is_manual) = match student.manual_class {
                Some(pin) if pin.is_within(k) => (pin, true),
                Some(pin) => {
                    warn!(
                        student_id = student.id,
                        manual_class = %pin,
                        total_new_classes = k,
                        "manual class out of range, keeping automatic slot"
                    );
                    output.stale_overrides.push(student.id);
                    (auto_class, false)
                }
                None => (auto_class, false),
            };

            output.assigned.push(AssignedStudent {
                student: (*student).clone(),
                auto_class,
                new_class,
                is_manual,
            });
        }

        Ok(())
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}
