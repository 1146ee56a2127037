//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading and splitting the dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row in a CSV file couldn't be deserialized
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A configuration value was outside its allowed range
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Errors from Catalog lookups
///
/// Lookups never default: an unknown id or a movie nobody rated is an
/// explicit error the caller has to handle.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Movie {0} not found in catalog")]
    NotFound(u32),

    #[error("Movie {0} has no ratings")]
    NoRatings(u32),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
