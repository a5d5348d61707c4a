// ==========================================
// Class Assign - allocator
// ==========================================
// Input: partitions from the partitioner + AssignmentConfig
// Output: AssignedStudent per eligible record
// Rule: manual pins are substituted per record after the automatic pass,
//       so one pin never moves another student's automatic slot
// ==========================================

mod core;
mod offset;


pub use core::{AllocationOutput, Allocator};
pub use offset::{start_index, target_index};
