// ==========================================
// Class Assign - file parsers
// ==========================================
// CSV (.csv) and Excel (.xlsx/.xls, first sheet)
// No header row is assumed; RowParser drops header lines
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn non_empty_cells<I, S>(cells: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(non_empty_cells(record.iter()));
        }

        Ok(rows)
    }
}

// ==========================================
// ExcelParser
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        Ok(range
            .rows()
            .map(|row| non_empty_cells(row.iter().map(|cell| cell.to_string())))
            .collect())
    }
}

// ==========================================
// UniversalFileParser - dispatch by extension
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_to_rows(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_rows(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_rows_keep_positions() {
        let temp_file = csv_file(&["번호,이름,성별,석차", "1,김민수,남,3", ",,,", "2,이서연,여,"]);

        let rows = CsvParser.parse_to_rows(temp_file.path()).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1], vec!["1", "김민수", "남", "3"]);
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], vec!["2", "이서연", "여"]);
    }

    #[test]
    fn test_csv_file_not_found() {
        let result = CsvParser.parse_to_rows(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse_to_rows(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }
}
