// ==========================================
// Class Assign - importer seams
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser - file to token rows
// ==========================================
pub trait FileParser: Send + Sync {
    /// Read every row of the file as trimmed, non-empty cell tokens
    ///
    /// A row whose cells are all empty comes back as an empty Vec so
    /// callers can still report 1-based row numbers.
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>>;
}
