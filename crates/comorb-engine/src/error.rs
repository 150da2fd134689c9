//! Error types for classifier construction.

use comorb_codes::CodingSystem;
use comorb_standards::TableError;
use thiserror::Error;

/// Errors raised while building a classifier.
///
/// Classification itself never fails.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// A reference table failed to load.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A table was paired with the rules of a different coding system.
    #[error("reference table {table} is {actual}, but the classifier uses {expected}")]
    SystemMismatch {
        table: String,
        expected: CodingSystem,
        actual: CodingSystem,
    },

    /// The embedded reference data failed to load.
    #[error("embedded reference data failed to load: {message}")]
    Embedded { message: String },
}

/// Result type for classifier construction.
pub type Result<T> = std::result::Result<T, EngineError>;
