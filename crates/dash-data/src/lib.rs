//! Data ingestion boundary for the dashboard
//!
//! Defines the `TableSource` trait through which parsed tabular data is
//! handed to the core, plus a delimited-text reference adapter.

pub mod sources;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use sources::{CsvSource, StaticSource, TableSource};

/// Errors that can occur while loading tabular data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("input has no header row")]
    MissingHeaders,

    #[error("join error: {0}")]
    Join(#[from] JoinError),
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
