// ==========================================
// Class Assign - assignment pipeline
// ==========================================
// Flow: Partitioner → Allocator → Aggregator
// Pure: same roster + config always gives the same result
// Recomputed from scratch on every call, nothing cached
// ==========================================

use crate::domain::assignment::AssignmentResult;
use crate::domain::settings::AssignmentConfig;
use crate::domain::student::StudentRecord;
use crate::engine::aggregate::Aggregator;
use crate::engine::allocator::Allocator;
use crate::engine::error::EngineResult;
use crate::engine::partition::Partitioner;
use tracing::{info, warn};

// ==========================================
// AssignmentEngine
// ==========================================
pub struct AssignmentEngine {
    allocator: Allocator,
}

impl AssignmentEngine {
    pub fn new() -> Self {
        Self {
            allocator: Allocator::new(),
        }
    }

    /// Run the whole pipeline on a roster snapshot
    ///
    /// # Errors
    /// - `EngineError::InvalidConfiguration` when `total_new_classes` is 0 or
    ///   exceeds the destination alphabet; checked before partitioning.
    pub fn recompute(
        &self,
        students: &[StudentRecord],
        config: &AssignmentConfig,
    ) -> EngineResult<AssignmentResult> {
        Allocator::check_destination_count(config.total_new_classes)?;

        // 1. partition
        let partitions = Partitioner::partition(students, config.total_current_classes);
        for excluded in &partitions.excluded {
            warn!(
                student_id = excluded.student_id,
                original_class = excluded.original_class,
                reason = %excluded.reason,
                "student left out of assignment"
            );
        }

        // 2. sort + offset + pins
        let allocation = self.allocator.allocate(&partitions.groups, config)?;

        // 3. tallies
        let stats = Aggregator::aggregate(&allocation.assigned, config);

        info!(
            roster = students.len(),
            assigned = allocation.assigned.len(),
            excluded = partitions.excluded.len(),
            stale_overrides = allocation.stale_overrides.len(),
            method = %config.assignment_method,
            total_new_classes = config.total_new_classes,
            "assignment recomputed"
        );

        Ok(AssignmentResult {
            assigned: allocation.assigned,
            stats,
            excluded: partitions.excluded,
            stale_overrides: allocation.stale_overrides,
        })
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
