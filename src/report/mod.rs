// ==========================================
// Class Assign - report layer
// ==========================================
// Printable views over an AssignmentResult (read-only)
// ==========================================

pub mod builder;
pub mod csv_export;
pub mod model;

pub use builder::ReportBuilder;
pub use csv_export::{export_to_path, to_csv_string, write_csv};
pub use model::{
    AssignmentReport, DestinationRoster, DestinationRow, OriginClassSheet, OriginRow, StatRow,
    StatisticsTable,
};
