//! Bootstrap loader error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    /// Seed file could not be opened
    #[error("Cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A row does not have the expected number of columns
    #[error("{file} line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        file: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A column value cannot be converted to the field type
    #[error("{file} line {line}: invalid value '{value}' for {field}")]
    InvalidField {
        file: String,
        line: u64,
        field: &'static str,
        value: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
