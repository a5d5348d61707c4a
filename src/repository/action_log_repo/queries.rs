use super::core::{ActionLogRepository, TS_FORMAT};
use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;
use rusqlite::{params, Result as SqliteResult, Row};

impl ActionLogRepository {
    // ==========================================
    // Queries
    // ==========================================

    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<Option<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT action_id, action_type, action_ts, actor,
                   student_id, payload_json, detail
            FROM action_log
            WHERE action_id = ?
            "#,
        )?;

        match stmt.query_row(params![action_id], |row| self.map_row(row)) {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// History of one student, newest first
    pub fn find_by_student(&self, student_id: i64) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT action_id, action_type, action_ts, actor,
                   student_id, payload_json, detail
            FROM action_log
            WHERE student_id = ?
            ORDER BY action_ts DESC, rowid DESC
            "#,
        )?;

        let logs = stmt
            .query_map(params![student_id], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    /// Most recent `limit` entries, newest first
    pub fn find_recent(&self, limit: u32) -> RepositoryResult<Vec<ActionLog>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT action_id, action_type, action_ts, actor,
                   student_id, payload_json, detail
            FROM action_log
            ORDER BY action_ts DESC, rowid DESC
            LIMIT ?
            "#,
        )?;

        let logs = stmt
            .query_map(params![limit], |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(logs)
    }

    pub fn count_by_type(&self, action_type: ActionType) -> RepositoryResult<u32> {
        let conn = self.get_conn()?;
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM action_log WHERE action_type = ?",
            params![action_type.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn map_row(&self, row: &Row) -> SqliteResult<ActionLog> {
        let action_id: String = row.get(0)?;
        let action_type_str: String = row.get(1)?;
        let action_ts_str: String = row.get(2)?;
        let actor: String = row.get(3)?;
        let student_id: Option<i64> = row.get(4)?;
        let payload_json_str: Option<String> = row.get(5)?;
        let detail: Option<String> = row.get(6)?;

        let action_type: ActionType = action_type_str.parse().map_err(|e: String| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?;

        let action_ts = NaiveDateTime::parse_from_str(&action_ts_str, TS_FORMAT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let payload_json = payload_json_str.and_then(|s| serde_json::from_str(&s).ok());

        Ok(ActionLog {
            action_id,
            action_type,
            action_ts,
            actor,
            student_id,
            payload_json,
            detail,
        })
    }
}
