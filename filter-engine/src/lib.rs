//! FILENAME: filter-engine/src/lib.rs
//! Filtering subsystem for the Superstore analytics core.
//!
//! This crate turns a serializable `FilterCriteria` (the immutable
//! snapshot of what the user selected) and a shared `Dataset` into a
//! `FilteredView`: the set of matching row indices. Every summary and
//! export downstream is computed over a view, never over the raw dataset.
//!
//! Layers:
//! - `criteria`: Serializable criteria value object (what the filter IS)
//! - `engine`: Predicate evaluation and the row-index view (HOW we filter)

pub mod criteria;
pub mod engine;

pub use criteria::FilterCriteria;
pub use engine::{apply, FilteredView};
