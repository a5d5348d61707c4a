// ==========================================
// Class Assign - repository layer
// ==========================================
// Data access behind parameterized SQL; no business rules
// ==========================================

pub mod action_log_repo;
pub mod error;
pub mod student_repo;

pub use action_log_repo::ActionLogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use student_repo::StudentRepository;
