//! Group-by aggregation over string-cell datasets

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use dash_core::Dataset;

/// One computed summary row for a group.
///
/// All numeric fields are computed only over the subset of the group's
/// values that parsed as finite numbers; `count` is the size of that subset
/// and is at least one in every emitted record.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRecord {
    /// Group key, the raw key-column cell text
    pub key: String,
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
    pub median: f64,
    pub mode: f64,
}

/// Parse a raw cell as a finite floating-point number.
///
/// Surrounding whitespace is ignored; anything that is not a complete finite
/// number (including the empty string) is rejected.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Group `dataset` rows by `key_column` and summarize `value_column`.
///
/// The group key is the raw cell text, used verbatim; a missing key cell
/// maps to the empty string, which is a valid key. Rows whose value cell
/// does not parse contribute to no statistic, and a group where every
/// contribution failed to parse is never emitted. Output preserves
/// first-seen group order.
///
/// Unknown column names are a degraded mode, not an error: every lookup
/// misses and the result is empty.
pub fn aggregate(dataset: &Dataset, key_column: &str, value_column: &str) -> Vec<AggregateRecord> {
    if !dataset.has_column(key_column) || !dataset.has_column(value_column) {
        warn!(
            "aggregation columns missing from dataset - key: '{}', value: '{}'",
            key_column, value_column
        );
    }

    let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut skipped = 0usize;

    for row in dataset.rows() {
        let key = row.get(key_column).map(String::as_str).unwrap_or("");
        let raw = row.get(value_column).map(String::as_str).unwrap_or("");
        match parse_numeric(raw) {
            Some(value) => groups.entry(key.to_string()).or_default().push(value),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("{} rows contributed no numeric value", skipped);
    }

    groups
        .into_iter()
        .map(|(key, values)| summarize(key, values))
        .collect()
}

fn summarize(key: String, values: Vec<f64>) -> AggregateRecord {
    let count = values.len();
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let median = median(&values);
    let mode = mode(&values);

    AggregateRecord {
        key,
        sum,
        avg: sum / count as f64,
        min,
        max,
        count,
        median,
        mode,
    }
}

/// Median of `values`: middle element for odd sizes, mean of the two middle
/// elements for even sizes.
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Most frequent value. Ties go to the value occurring last when the
/// distinct values, taken in first-occurrence order, are stably sorted by
/// ascending frequency.
fn mode(values: &[f64]) -> f64 {
    let mut frequencies: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &value in values {
        let entry = frequencies.entry(value.to_bits()).or_insert((value, 0));
        entry.1 += 1;
    }

    let mut entries: Vec<(f64, usize)> = frequencies.into_values().collect();
    entries.sort_by_key(|&(_, freq)| freq);
    entries.last().map(|&(value, _)| value).unwrap_or(f64::NAN)
}
