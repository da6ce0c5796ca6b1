//! Error types for the data-loader crate.
//!
//! Every failure that can happen while reading the interaction table
//! surfaces here. Malformed rows are reported with their line number so a
//! broken export can be fixed at the source instead of being silently
//! defaulted.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The header row lacks a column the recommender needs
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    /// Line in data file couldn't be parsed
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },

    /// The file had a header but no interaction rows
    #[error("Dataset contains no interaction rows")]
    EmptyDataset,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
