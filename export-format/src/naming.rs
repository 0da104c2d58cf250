//! FILENAME: export-format/src/naming.rs
//! Download file names: a fixed prefix per export kind plus a compact
//! timestamp suffix.

use chrono::{Local, NaiveDateTime};

/// The three export payloads, each with its own file-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    FilteredData,
    SummaryStats,
    AggregatedData,
}

impl ExportKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ExportKind::FilteredData => "superstore_filtered_data",
            ExportKind::SummaryStats => "superstore_summary_stats",
            ExportKind::AggregatedData => "superstore_aggregated_data",
        }
    }
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.csv` for an explicit timestamp.
pub fn export_file_name(kind: ExportKind, timestamp: NaiveDateTime) -> String {
    format!("{}_{}.csv", kind.prefix(), timestamp.format("%Y%m%d_%H%M%S"))
}

/// `export_file_name` at the current local time.
pub fn export_file_name_now(kind: ExportKind) -> String {
    export_file_name(kind, Local::now().naive_local())
}
