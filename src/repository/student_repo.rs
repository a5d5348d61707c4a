// ==========================================
// Class Assign - student repository
// ==========================================
// Data access only; validation lives in the API layer
// Ids come from INTEGER PRIMARY KEY AUTOINCREMENT (monotonic)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::student::{NewStudent, StudentRecord};
use crate::domain::types::{DestinationCode, Gender, DESTINATION_LABELS};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Local;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, gender, rank, note, is_transfer, original_class, manual_class
    FROM student
"#;

// Raw row as stored; converted outside the rusqlite closure
struct StudentRow {
    id: i64,
    name: String,
    gender: String,
    rank: u32,
    note: String,
    is_transfer: bool,
    original_class: u32,
    manual_class: Option<String>,
}

impl StudentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            gender: row.get(2)?,
            rank: row.get(3)?,
            note: row.get(4)?,
            is_transfer: row.get(5)?,
            original_class: row.get(6)?,
            manual_class: row.get(7)?,
        })
    }

    fn into_record(self) -> RepositoryResult<StudentRecord> {
        let gender: Gender = self
            .gender
            .parse()
            .map_err(|message| RepositoryError::FieldValueError {
                field: "gender".to_string(),
                message,
            })?;

        // empty string is stored by older snapshots for "no pin"
        let manual_class = match self.manual_class.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(DestinationCode::from_label(label).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "manual_class".to_string(),
                    message: format!("unknown destination code '{}' (id={})", label, self.id),
                }
            })?),
        };

        Ok(StudentRecord {
            id: self.id,
            name: self.name,
            gender,
            rank: self.rank,
            note: self.note,
            is_transfer: self.is_transfer,
            original_class: self.original_class,
            manual_class,
        })
    }
}

// ==========================================
// StudentRepository
// ==========================================
pub struct StudentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepository {
    /// Open a dedicated connection
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Writes
    // ==========================================

    /// Insert one student, returning the new id
    pub fn insert(&self, student: &NewStudent) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        insert_new(&conn, student)?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert many students in one transaction
    ///
    /// Returns the new ids in input order.
    pub fn batch_insert(&self, students: &[NewStudent]) -> RepositoryResult<Vec<i64>> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut ids = Vec::with_capacity(students.len());
        for student in students {
            insert_new(&tx, student)?;
            ids.push(tx.last_insert_rowid());
        }

        tx.commit()?;
        Ok(ids)
    }

    /// Overwrite every editable field of an existing row (manual_class included)
    pub fn update(&self, student: &StudentRecord) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE student
            SET name = ?2, gender = ?3, rank = ?4, note = ?5, is_transfer = ?6,
                original_class = ?7, manual_class = ?8, updated_at = ?9
            WHERE id = ?1
            "#,
            params![
                student.id,
                student.name,
                student.gender.to_string(),
                student.rank,
                student.note,
                student.is_transfer,
                student.original_class,
                student.manual_class.map(|c| c.label()),
                Local::now().to_rfc3339(),
            ],
        )?;
        Ok(rows)
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM student WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    pub fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM student", [])?;
        Ok(rows)
    }

    /// Set or clear one pin
    pub fn set_manual_class(
        &self,
        id: i64,
        manual_class: Option<DestinationCode>,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE student SET manual_class = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, manual_class.map(|c| c.label()), Local::now().to_rfc3339()],
        )?;
        Ok(rows)
    }

    /// Clear every pin
    pub fn clear_all_manual_classes(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "UPDATE student SET manual_class = NULL, updated_at = ?1 WHERE manual_class IS NOT NULL",
            params![Local::now().to_rfc3339()],
        )?;
        Ok(rows)
    }

    /// Clear pins that name a class at or beyond `total_new_classes`
    pub fn clear_manual_classes_beyond(&self, total_new_classes: u32) -> RepositoryResult<usize> {
        self.clear_manual_classes_beyond_with(total_new_classes, |_| Ok(()))
    }

    /// Same as `clear_manual_classes_beyond`, with `then` run in the same transaction
    ///
    /// Nothing is committed when `then` fails.
    pub fn clear_manual_classes_beyond_with<F>(
        &self,
        total_new_classes: u32,
        then: F,
    ) -> RepositoryResult<usize>
    where
        F: FnOnce(&Transaction<'_>) -> RepositoryResult<()>,
    {
        let stale: Vec<&str> = DESTINATION_LABELS
            .iter()
            .skip(total_new_classes as usize)
            .copied()
            .collect();

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let rows = if stale.is_empty() {
            0
        } else {
            let placeholders = vec!["?"; stale.len()].join(", ");
            let sql = format!(
                "UPDATE student SET manual_class = NULL WHERE manual_class IN ({})",
                placeholders
            );
            tx.execute(&sql, params_from_iter(stale.iter()))?
        };

        then(&tx)?;
        tx.commit()?;
        Ok(rows)
    }

    /// Replace the whole roster, keeping the given ids
    pub fn replace_all(&self, students: &[StudentRecord]) -> RepositoryResult<usize> {
        self.replace_all_with(students, |_| Ok(()))
    }

    /// Same as `replace_all`, with `then` run in the same transaction
    ///
    /// Nothing is committed when `then` fails.
    pub fn replace_all_with<F>(&self, students: &[StudentRecord], then: F) -> RepositoryResult<usize>
    where
        F: FnOnce(&Transaction<'_>) -> RepositoryResult<()>,
    {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let now = Local::now().to_rfc3339();

        tx.execute("DELETE FROM student", [])?;
        for student in students {
            tx.execute(
                r#"
                INSERT INTO student (
                    id, name, gender, rank, note, is_transfer,
                    original_class, manual_class, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
                "#,
                params![
                    student.id,
                    student.name,
                    student.gender.to_string(),
                    student.rank,
                    student.note,
                    student.is_transfer,
                    student.original_class,
                    student.manual_class.map(|c| c.label()),
                    now,
                ],
            )?;
        }

        then(&tx)?;
        tx.commit()?;
        Ok(students.len())
    }

    // ==========================================
    // Reads
    // ==========================================

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<StudentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let row = conn
            .query_row(&sql, params![id], StudentRow::from_row)
            .optional()?;
        row.map(StudentRow::into_record).transpose()
    }

    /// Whole roster in id order
    pub fn list_all(&self) -> RepositoryResult<Vec<StudentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], StudentRow::from_row)?;

        let mut students = Vec::new();
        for row in rows {
            students.push(row?.into_record()?);
        }
        Ok(students)
    }

    pub fn list_by_class(&self, original_class: u32) -> RepositoryResult<Vec<StudentRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE original_class = ?1 ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![original_class], StudentRow::from_row)?;

        let mut students = Vec::new();
        for row in rows {
            students.push(row?.into_record()?);
        }
        Ok(students)
    }

    /// Head count per origin class (classes with no rows are absent)
    pub fn count_by_class(&self) -> RepositoryResult<BTreeMap<u32, u32>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT original_class, COUNT(*) FROM student GROUP BY original_class",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)))?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (class, count) = row?;
            counts.insert(class, count);
        }
        Ok(counts)
    }
}

fn insert_new(conn: &Connection, student: &NewStudent) -> RepositoryResult<()> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        r#"
        INSERT INTO student (
            name, gender, rank, note, is_transfer, original_class,
            manual_class, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?7)
        "#,
        params![
            student.name,
            student.gender.to_string(),
            student.rank,
            student.note,
            student.is_transfer,
            student.original_class,
            now,
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};

    fn repo() -> StudentRepository {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        StudentRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn new_student(name: &str, gender: Gender, original_class: u32) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            gender,
            rank: 1,
            note: String::new(),
            is_transfer: false,
            original_class,
        }
    }

    #[test]
    fn test_ids_are_monotonic_after_delete() {
        let repo = repo();
        let a = repo.insert(&new_student("가", Gender::M, 1)).unwrap();
        let b = repo.insert(&new_student("나", Gender::F, 1)).unwrap();
        repo.delete(b).unwrap();
        let c = repo.insert(&new_student("다", Gender::F, 1)).unwrap();

        assert!(a < b);
        assert!(c > b);
    }

    #[test]
    fn test_manual_class_round_trip() {
        let repo = repo();
        let id = repo.insert(&new_student("홍길동", Gender::M, 2)).unwrap();
        let ra = DestinationCode::from_label("라").unwrap();

        repo.set_manual_class(id, Some(ra)).unwrap();
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().manual_class, Some(ra));

        repo.set_manual_class(id, None).unwrap();
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().manual_class, None);
    }

    #[test]
    fn test_clear_manual_classes_beyond() {
        let repo = repo();
        let ids = repo
            .batch_insert(&[
                new_student("a", Gender::M, 1),
                new_student("b", Gender::M, 1),
            ])
            .unwrap();
        repo.set_manual_class(ids[0], DestinationCode::from_label("나")).unwrap();
        repo.set_manual_class(ids[1], DestinationCode::from_label("마")).unwrap();

        let cleared = repo.clear_manual_classes_beyond(3).unwrap();
        assert_eq!(cleared, 1);
        assert!(repo.find_by_id(ids[0]).unwrap().unwrap().manual_class.is_some());
        assert!(repo.find_by_id(ids[1]).unwrap().unwrap().manual_class.is_none());
    }

    #[test]
    fn test_failed_follow_up_rolls_back_replace() {
        let repo = repo();
        let id = repo.insert(&new_student("홍길동", Gender::M, 1)).unwrap();

        let replacement = vec![StudentRecord {
            id: 50,
            name: "이서연".to_string(),
            gender: Gender::F,
            rank: 1,
            note: String::new(),
            is_transfer: false,
            original_class: 2,
            manual_class: None,
        }];
        let result = repo.replace_all_with(&replacement, |_| {
            Err(RepositoryError::DatabaseQueryError("follow-up failed".to_string()))
        });

        assert!(result.is_err());
        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
    }

    #[test]
    fn test_failed_follow_up_keeps_pins() {
        let repo = repo();
        let id = repo.insert(&new_student("a", Gender::M, 1)).unwrap();
        repo.set_manual_class(id, DestinationCode::from_label("마")).unwrap();

        let result = repo.clear_manual_classes_beyond_with(3, |tx| {
            tx.execute("INSERT INTO no_such_table VALUES (1)", [])?;
            Ok(())
        });

        assert!(result.is_err());
        assert!(repo.find_by_id(id).unwrap().unwrap().manual_class.is_some());
    }

    #[test]
    fn test_count_by_class() {
        let repo = repo();
        repo.batch_insert(&[
            new_student("a", Gender::M, 1),
            new_student("b", Gender::F, 1),
            new_student("c", Gender::F, 3),
        ])
        .unwrap();

        let counts = repo.count_by_class().unwrap();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), None);
        assert_eq!(counts.get(&3), Some(&1));
    }
}
