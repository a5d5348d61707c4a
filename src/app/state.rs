// ==========================================
// Class Assign - application state
// ==========================================
// One shared connection; every repository and API hangs off it
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AssignmentApi, ConfigApi, RosterApi};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::AssignmentEngine;
use crate::importer::{RosterImporter, UniversalFileParser};
use crate::perf::install_sqlite_tracing;
use crate::repository::{ActionLogRepository, StudentRepository};

/// Env var overriding the database location
pub const DB_PATH_ENV: &str = "CLASS_ASSIGN_DB_PATH";

/// Actor recorded in the action log when none is given
pub const DEFAULT_ACTOR: &str = "local";

pub struct AppState {
    pub db_path: String,
    pub roster_api: Arc<RosterApi>,
    pub config_api: Arc<ConfigApi>,
    pub assignment_api: Arc<AssignmentApi>,
    /// Audit trail reads
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_actor(db_path, DEFAULT_ACTOR)
    }

    /// Open (and migrate) the database, then build every API
    pub fn with_actor(db_path: String, actor: &str) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initializing app state");

        let mut conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        install_sqlite_tracing(&mut conn);
        init_schema(&conn).map_err(|e| format!("schema init failed: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // repositories
        // ==========================================
        let student_repo = Arc::new(StudentRepository::from_connection(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );

        // ==========================================
        // engine + importer
        // ==========================================
        let engine = Arc::new(AssignmentEngine::new());
        let importer = Arc::new(RosterImporter::new(
            student_repo.clone(),
            action_log_repo.clone(),
            Box::new(UniversalFileParser),
        ));

        // ==========================================
        // APIs
        // ==========================================
        let roster_api = Arc::new(RosterApi::new(
            student_repo.clone(),
            action_log_repo.clone(),
            config_manager.clone(),
            importer,
            actor,
        ));
        let config_api = Arc::new(ConfigApi::new(
            config_manager.clone(),
            student_repo.clone(),
            action_log_repo.clone(),
            actor,
        ));
        let assignment_api = Arc::new(AssignmentApi::new(student_repo, config_manager, engine));

        tracing::info!("app state ready");

        Ok(Self {
            db_path,
            roster_api,
            config_api,
            assignment_api,
            action_log_repo,
        })
    }

    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

/// Default database location
///
/// - `CLASS_ASSIGN_DB_PATH` when set
/// - otherwise `<data dir>/class-assign/class_assign.db` (debug builds use `class-assign-dev`)
/// - `./class_assign.db` when no data dir is known
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./class_assign.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = if cfg!(debug_assertions) {
            data_dir.join("class-assign-dev")
        } else {
            data_dir.join("class-assign")
        };

        // a missing dir surfaces later as an open error
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("class_assign.db");
    }

    path.to_string_lossy().to_string()
}
