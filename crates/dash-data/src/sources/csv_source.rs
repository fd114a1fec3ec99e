//! Delimited-text source

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::info;

use dash_core::{Dataset, Row};

use crate::{DataError, TableSource};

/// Delimited-text source producing string-cell datasets.
///
/// Cells are surfaced exactly as they appear in the input; no numeric
/// coercion happens at ingest. Rows shorter than the header list simply omit
/// the trailing cells, so a row's key set stays a subset of the headers.
pub struct CsvSource {
    /// Path to the delimited-text file
    path: PathBuf,
    /// Field delimiter
    delimiter: u8,
}

impl CsvSource {
    /// Create a source reading comma-separated text from a file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            delimiter: b',',
        }
    }

    /// Override the field delimiter (e.g. `b'\t'` for TSV).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Decode delimited text from any reader into a dataset.
    pub fn read_from<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.is_empty() {
            return Err(DataError::MissingHeaders);
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let mut row = Row::default();
            for (idx, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(idx) {
                    row.insert(header.clone(), value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(Dataset::new(headers, rows))
    }
}

#[async_trait]
impl TableSource for CsvSource {
    async fn load(&self) -> Result<Dataset, DataError> {
        let path = self.path.clone();
        let delimiter = self.delimiter;

        let dataset = tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            Self::read_from(BufReader::new(file), delimiter)
        })
        .await??;

        info!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.column_count(),
            self.source_name()
        );
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
