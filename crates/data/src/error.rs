//! Dataset loading errors.

use snt_core::BudgetError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while loading reference datasets or serving a request.
#[derive(Debug, Error)]
pub enum DataError {
    /// No datasets exist for the country.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// Country identifier contains characters outside `[a-z0-9_-]`.
    #[error("Invalid country identifier: {0:?}")]
    InvalidCountry(String),

    /// A dataset file could not be opened.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid CSV.
    #[error("Malformed CSV in {}: {source}", path.display())]
    Csv {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header.
    #[error("Missing column {column} in {}", path.display())]
    MissingColumn {
        /// File path.
        path: PathBuf,
        /// Column name.
        column: &'static str,
    },

    /// A cell could not be parsed.
    #[error("Invalid value {value:?} for {column} in {} line {line}", path.display())]
    InvalidValue {
        /// File path.
        path: PathBuf,
        /// One-based line number.
        line: u64,
        /// Column name.
        column: String,
        /// Raw cell content.
        value: String,
    },

    /// The budget engine rejected the data or the request.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// A load failure shared by concurrent callers of the dataset cache.
    #[error(transparent)]
    Shared(Arc<DataError>),
}

/// Result type for dataset operations.
pub type DataResult<T> = Result<T, DataError>;
