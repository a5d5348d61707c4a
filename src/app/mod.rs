// ==========================================
// Class Assign - application layer
// ==========================================
// Wires repositories, engine and APIs over one SQLite connection
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState, DB_PATH_ENV, DEFAULT_ACTOR};
