// ==========================================
// Class Assign - importer layer
// ==========================================
// Pasted text and .csv/.xlsx/.xls files into one origin class
// ==========================================

pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod roster_importer;
pub mod row_parser;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::FileParser;
pub use roster_importer::{ImportReport, RosterImporter};
pub use row_parser::{ParsedRow, RowParser};
