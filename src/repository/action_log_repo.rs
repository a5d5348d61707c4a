// ==========================================
// Class Assign - action log repository
// ==========================================
// Audit trail: every roster/config write is recorded
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::ActionLogRepository;
