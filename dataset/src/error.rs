//! FILENAME: dataset/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid date in {path}, column '{column}', data line {line}: '{value}' does not match day/month/year")]
    Date {
        path: PathBuf,
        column: &'static str,
        value: String,
        line: u64,
    },
}
