//! Whole-table per-column statistics

use serde::Serialize;

use dash_core::Dataset;

use crate::aggregate::{median, parse_numeric};

/// Statistics for one column over the whole table.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// `None` when the column has no parseable numeric values
    pub stats: Option<NumericSummary>,
}

/// Mean, median and population standard deviation of a column's numeric
/// values.
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub count: usize,
}

/// Summarize every column of `dataset`, in header order.
///
/// Uses the same numeric-parse rule as aggregation: cells that do not parse
/// as finite numbers are excluded silently.
pub fn summarize_columns(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset
        .headers()
        .iter()
        .map(|header| {
            let values: Vec<f64> = dataset
                .rows()
                .iter()
                .filter_map(|row| row.get(header))
                .filter_map(|raw| parse_numeric(raw))
                .collect();
            ColumnSummary {
                column: header.clone(),
                stats: numeric_summary(&values),
            }
        })
        .collect()
}

fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    Some(NumericSummary {
        mean,
        median: median(values),
        std_dev: variance.sqrt(),
        count,
    })
}
