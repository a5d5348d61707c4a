// ==========================================
// Class Assign - config manager
// ==========================================
// Storage: config_kv table (scope_id = 'global', key/value text)
// Missing or malformed values fall back to defaults with a warning
// ==========================================

use crate::config::settings_reader::SettingsReader;
use crate::db::open_sqlite_connection;
use crate::domain::settings::{
    AssignmentConfig, ReportMeta, DEFAULT_GRADE, DEFAULT_SCHOOL_YEAR,
    DEFAULT_TOTAL_CURRENT_CLASSES, DEFAULT_TOTAL_NEW_CLASSES,
};
use crate::domain::types::AssignmentMethod;
use rusqlite::{params, Connection, Transaction};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Open a dedicated connection
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection (PRAGMAs re-applied, idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("lock failed: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Read a raw global value
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// Typed read; unparsable values log a warning and use `default`
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy,
    {
        let Some(raw) = self.get_config_value(key)? else {
            return Ok(default);
        };
        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(config_key = key, raw_value = %raw, "config value malformed, using default");
                Ok(default)
            }
        }
    }

    /// Upsert one global value
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), Box<dyn Error>> {
        let mut conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        let tx = conn.transaction()?;
        upsert_tx(&tx, entries)?;
        tx.commit()?;
        Ok(())
    }

    /// Persist all three assignment settings atomically
    pub fn update_assignment_config(&self, config: &AssignmentConfig) -> Result<(), Box<dyn Error>> {
        self.set_many(&assignment_entries(config))
    }

    pub fn update_report_meta(&self, meta: &ReportMeta) -> Result<(), Box<dyn Error>> {
        self.set_many(&report_meta_entries(meta))
    }

    /// Write assignment settings inside a caller-owned transaction
    pub fn write_assignment_config_tx(
        tx: &Transaction<'_>,
        config: &AssignmentConfig,
    ) -> rusqlite::Result<()> {
        upsert_tx(tx, &assignment_entries(config))
    }

    /// Write report header settings inside a caller-owned transaction
    pub fn write_report_meta_tx(tx: &Transaction<'_>, meta: &ReportMeta) -> rusqlite::Result<()> {
        upsert_tx(tx, &report_meta_entries(meta))
    }

    /// Drop every global value so getters return defaults again
    pub fn reset_to_defaults(&self) -> Result<usize, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        let rows = conn.execute("DELETE FROM config_kv WHERE scope_id = 'global'", [])?;
        Ok(rows)
    }

    /// All global values as a JSON object string
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// Write back a snapshot from `get_config_snapshot`
    ///
    /// Returns the number of keys written.
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.conn.lock().map_err(|e| format!("lock failed: {}", e))?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

fn upsert_tx(tx: &Transaction<'_>, entries: &[(&str, String)]) -> rusqlite::Result<()> {
    for (key, value) in entries {
        tx.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
    }
    Ok(())
}

fn assignment_entries(config: &AssignmentConfig) -> [(&'static str, String); 3] {
    [
        (config_keys::TOTAL_CURRENT_CLASSES, config.total_current_classes.to_string()),
        (config_keys::TOTAL_NEW_CLASSES, config.total_new_classes.to_string()),
        (config_keys::ASSIGNMENT_METHOD, config.assignment_method.to_string()),
    ]
}

fn report_meta_entries(meta: &ReportMeta) -> [(&'static str, String); 3] {
    [
        (config_keys::SCHOOL_YEAR, meta.year.to_string()),
        (config_keys::GRADE, meta.grade.to_string()),
        (config_keys::TEACHER_NAME, meta.teacher_name.clone()),
    ]
}

// ==========================================
// SettingsReader impl
// ==========================================
impl SettingsReader for ConfigManager {
    fn get_assignment_config(&self) -> Result<AssignmentConfig, Box<dyn Error>> {
        let total_current_classes = self.get_parsed_or_default(
            config_keys::TOTAL_CURRENT_CLASSES,
            DEFAULT_TOTAL_CURRENT_CLASSES,
        )?;
        let total_new_classes =
            self.get_parsed_or_default(config_keys::TOTAL_NEW_CLASSES, DEFAULT_TOTAL_NEW_CLASSES)?;
        let assignment_method = self
            .get_parsed_or_default(config_keys::ASSIGNMENT_METHOD, AssignmentMethod::default())?;

        Ok(AssignmentConfig {
            total_current_classes,
            total_new_classes,
            assignment_method,
        })
    }

    fn get_report_meta(&self) -> Result<ReportMeta, Box<dyn Error>> {
        let year = self.get_parsed_or_default(config_keys::SCHOOL_YEAR, DEFAULT_SCHOOL_YEAR)?;
        let grade = self.get_parsed_or_default(config_keys::GRADE, DEFAULT_GRADE)?;
        let teacher_name = self
            .get_config_value(config_keys::TEACHER_NAME)?
            .unwrap_or_default();

        Ok(ReportMeta {
            year,
            grade,
            teacher_name,
        })
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // assignment
    pub const TOTAL_CURRENT_CLASSES: &str = "total_current_classes";
    pub const TOTAL_NEW_CLASSES: &str = "total_new_classes";
    pub const ASSIGNMENT_METHOD: &str = "assignment_method";

    // report header
    pub const SCHOOL_YEAR: &str = "school_year";
    pub const GRADE: &str = "grade";
    pub const TEACHER_NAME: &str = "teacher_name";
}
