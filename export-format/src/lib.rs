//! FILENAME: export-format/src/lib.rs
//! Export payloads for the Superstore analytics core.
//!
//! Three downloadable CSV payloads, each with a header row, deterministic
//! column order, and no row-index column:
//! - the full filtered view (re-parseable by the `dataset` loader),
//! - descriptive statistics of the view's numeric fields,
//! - the (category, sub-category, region) aggregate.
//!
//! Layers:
//! - `filtered`: Row-by-row serialization of the view
//! - `stats`: Descriptive statistics (count/mean/std/quartiles)
//! - `aggregate`: The three-key grouped export
//! - `naming`: Timestamped download file names
//! - `error`: Export failure type

pub mod aggregate;
pub mod error;
pub mod filtered;
pub mod naming;
pub mod stats;

pub use aggregate::{aggregate_to_string, write_aggregate};
pub use error::ExportError;
pub use filtered::{filtered_to_string, write_filtered};
pub use naming::{export_file_name, export_file_name_now, ExportKind};
pub use stats::{describe, summary_stats_to_string, write_summary_stats, FieldStats};
