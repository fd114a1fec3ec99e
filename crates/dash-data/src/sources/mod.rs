//! Table sources that produce datasets

mod csv_source;

pub use csv_source::CsvSource;

use async_trait::async_trait;
use dash_core::Dataset;

use crate::DataError;

/// Trait for sources of tabular data.
///
/// Decoding is the only asynchronous boundary in the system; implementations
/// run their IO off the caller's thread and hand back a fully materialized
/// dataset. The core never looks inside the decoding mechanics.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Decode the source into a dataset.
    async fn load(&self) -> Result<Dataset, DataError>;

    /// Name of the source, for diagnostics and events.
    fn source_name(&self) -> &str;
}

/// A source serving an already materialized dataset.
///
/// Fits hosts that decode data themselves (e.g. a browser upload handed over
/// as parsed rows) and doubles as a test fixture.
pub struct StaticSource {
    name: String,
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, dataset: Dataset) -> Self {
        Self {
            name: name.into(),
            dataset,
        }
    }
}

#[async_trait]
impl TableSource for StaticSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        Ok(self.dataset.clone())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
