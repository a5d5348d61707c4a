// ==========================================
// Class Assign - roster importer
// ==========================================
// Flow: lines/rows -> RowParser -> batch insert -> ActionLog
// Nothing is written when no row is recognized
// ==========================================

use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::student::NewStudent;
use crate::domain::types::MAX_CLASSES;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use crate::importer::row_parser::{ParsedRow, RowParser};
use crate::repository::{ActionLogRepository, StudentRepository};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// ImportReport
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub target_class: u32,
    pub added: usize,
    pub student_ids: Vec<i64>,
    pub skipped_lines: Vec<usize>, // 1-based
}

// ==========================================
// RosterImporter
// ==========================================
pub struct RosterImporter {
    student_repo: Arc<StudentRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    file_parser: Box<dyn FileParser>,
    row_parser: RowParser,
}

impl RosterImporter {
    pub fn new(
        student_repo: Arc<StudentRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        file_parser: Box<dyn FileParser>,
    ) -> Self {
        Self {
            student_repo,
            action_log_repo,
            file_parser,
            row_parser: RowParser::new(),
        }
    }

    /// Import pasted text, one student per line
    #[instrument(skip(self, text))]
    pub fn import_text(
        &self,
        text: &str,
        target_class: u32,
        actor: &str,
    ) -> ImportResult<ImportReport> {
        check_target_class(target_class)?;

        let parsed = text
            .lines()
            .map(|line| self.row_parser.parse_line(line))
            .collect::<Vec<_>>();

        self.persist(parsed, target_class, actor, "text")
    }

    /// Import a .csv/.xlsx/.xls file, one student per row
    #[instrument(skip(self))]
    pub fn import_file(
        &self,
        file_path: &Path,
        target_class: u32,
        actor: &str,
    ) -> ImportResult<ImportReport> {
        check_target_class(target_class)?;

        let rows = self.file_parser.parse_to_rows(file_path)?;
        debug!(rows = rows.len(), "file parsed");

        let parsed = rows
            .iter()
            .map(|cells| self.row_parser.parse_cells(cells))
            .collect::<Vec<_>>();

        self.persist(parsed, target_class, actor, &file_path.display().to_string())
    }

    fn persist(
        &self,
        parsed: Vec<Option<ParsedRow>>,
        target_class: u32,
        actor: &str,
        source: &str,
    ) -> ImportResult<ImportReport> {
        let mut students: Vec<NewStudent> = Vec::new();
        let mut skipped_lines = Vec::new();

        for (idx, row) in parsed.into_iter().enumerate() {
            match row {
                Some(row) => students.push(row.into_new_student(target_class)),
                None => skipped_lines.push(idx + 1),
            }
        }

        if students.is_empty() {
            return Err(ImportError::NoRecognizedRows {
                skipped: skipped_lines.len(),
            });
        }

        let batch_id = Uuid::new_v4().to_string();
        let student_ids = self.student_repo.batch_insert(&students)?;

        let log = ActionLog::new(ActionType::Import, actor)
            .with_payload(json!({
                "batch_id": batch_id,
                "target_class": target_class,
                "source": source,
                "added": student_ids.len(),
                "skipped_lines": skipped_lines,
            }))
            .with_detail(format!("imported {} students into class {}", student_ids.len(), target_class));
        self.action_log_repo.insert(&log)?;

        info!(
            batch_id = %batch_id,
            target_class,
            added = student_ids.len(),
            skipped = skipped_lines.len(),
            "roster import finished"
        );

        Ok(ImportReport {
            batch_id,
            target_class,
            added: student_ids.len(),
            student_ids,
            skipped_lines,
        })
    }
}

fn check_target_class(target_class: u32) -> ImportResult<()> {
    if target_class == 0 || target_class > MAX_CLASSES {
        return Err(ImportError::InvalidTargetClass {
            class: target_class,
            max: MAX_CLASSES,
        });
    }
    Ok(())
}
