//! Error types for reference table loading.

use std::path::PathBuf;

use comorb_codes::{PatternError, RangeError};
use thiserror::Error;

/// Errors that can occur while building a reference table.
///
/// Every variant is fatal: a classifier cannot be built from a table that
/// failed to load.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
    /// Failed to read a reference or configuration file.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to parse delimited text.
    #[error("CSV parse error in {file}: {message}")]
    CsvParse { file: String, message: String },

    /// A required column is absent from the header.
    #[error("missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A cell holds a value outside its allowed set.
    #[error("invalid {field} value '{value}' in {file} (record {record})")]
    InvalidValue {
        file: String,
        record: usize,
        field: String,
        value: String,
    },

    /// A reference expression could not be parsed.
    #[error("invalid reference expression for '{label}' in {file}: {source}")]
    InvalidExpression {
        file: String,
        label: String,
        #[source]
        source: RangeError,
    },

    /// The table has no usable rows.
    #[error("reference table {file} has no rows")]
    EmptyTable { file: String },

    /// The compiled code patterns failed their self-check.
    #[error("code pattern self-check failed: {0}")]
    PatternCheck(#[from] PatternError),
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(file: &str, error: &csv::Error) -> Self {
        Self::CsvParse {
            file: file.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type for reference table loading.
pub type Result<T> = std::result::Result<T, TableError>;
