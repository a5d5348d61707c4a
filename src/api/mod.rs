// ==========================================
// Class Assign - API layer
// ==========================================
// Entry points for the CLI (and any other front end)
// ==========================================

pub mod assignment_api;
pub mod config_api;
pub mod error;
pub mod roster_api;
pub mod validator;

pub use assignment_api::AssignmentApi;
pub use config_api::{ConfigApi, ConfigUpdateReport};
pub use error::{ApiError, ApiResult};
pub use roster_api::RosterApi;
pub use validator::{RosterValidator, MIN_NEW_CLASSES};
