// ==========================================
// Class Assign - aggregator
// ==========================================
// Input: final assignment list
// Output: one DestinationStats per destination code (zero rows kept)
// ==========================================

use crate::domain::assignment::DestinationStats;
use crate::domain::settings::AssignmentConfig;
use crate::domain::student::AssignedStudent;
use crate::domain::types::{DestinationCode, Gender};
use std::collections::BTreeMap;

pub struct Aggregator;

impl Aggregator {
    /// Fold the assignment list into per-destination tallies
    pub fn aggregate(
        assigned: &[AssignedStudent],
        config: &AssignmentConfig,
    ) -> BTreeMap<DestinationCode, DestinationStats> {
        let mut stats: BTreeMap<DestinationCode, DestinationStats> =
            DestinationCode::first_n(config.total_new_classes)
                .into_iter()
                .map(|code| (code, DestinationStats::seeded(config.total_current_classes)))
                .collect();

        for row in assigned {
            // allocator guarantees new_class is in range; skip anything else
            let Some(entry) = stats.get_mut(&row.new_class) else {
                continue;
            };
            match row.student.gender {
                Gender::M => entry.male += 1,
                Gender::F => entry.female += 1,
            }
            entry.total += 1;
            if row.student.is_transfer {
                entry.transfer += 1;
            }
            *entry
                .by_original_class
                .entry(row.student.original_class)
                .or_insert(0) += 1;
        }

        stats
    }
}
