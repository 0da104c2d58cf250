//! FILENAME: dataset/src/lib.rs
//! Superstore transaction dataset.
//!
//! This crate owns the input side of the analytics pipeline: reading the
//! delimited sales file, normalizing its encoding, parsing dates, and
//! computing the per-record derived fields everything downstream relies on.
//!
//! Layers:
//! - `record`: The transaction record and its derived fields (WHAT a row IS)
//! - `loader`: CSV reading with encoding fallback (HOW rows get in)
//! - `cache`: Process-scoped memoization of loads (WHEN we re-read)
//! - `error`: Load failure diagnostics

pub mod cache;
pub mod error;
pub mod loader;
pub mod record;

pub use cache::{global_cache, DatasetCache};
pub use error::LoadError;
pub use loader::{load_dataset, parse_dataset, DATE_FORMAT};
pub use record::{Dataset, MonthPeriod, SourceFields, Transaction};
