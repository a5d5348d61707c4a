// ==========================================
// Class Assign - engine layer
// ==========================================
// Pure computation only: no SQL, no file access
// ==========================================

pub mod aggregate;
pub mod allocator;
pub mod error;
pub mod orchestrator;
pub mod ordering;
pub mod partition;

pub use aggregate::Aggregator;
pub use allocator::{AllocationOutput, Allocator};
pub use error::{EngineError, EngineResult};
pub use orchestrator::AssignmentEngine;
pub use ordering::{compare_names, StudentSorter};
pub use partition::{OriginPartition, PartitionOutput, Partitioner};
