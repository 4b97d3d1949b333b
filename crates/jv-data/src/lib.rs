//! Data loading for the job-postings dashboard
//!
//! Owns the raw-row source: reading the tabular dataset from disk and
//! handing parsed rows to the `jv-core` normalizer. Fatal load conditions
//! live here, never in the core.

pub mod sources;

use thiserror::Error;

// Re-exports
pub use sources::CsvSource;

/// Errors that can occur while loading data.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
