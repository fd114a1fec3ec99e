//! In-memory representation of parsed tabular data

use ahash::{AHashMap, AHashSet};

/// A single parsed row: column name -> raw cell text.
///
/// Cells stay strings regardless of apparent numeric content; numeric
/// interpretation happens on demand during aggregation and is never stored
/// back.
pub type Row = AHashMap<String, String>;

/// Parsed tabular data held fully in memory.
///
/// A dataset is replaced wholesale on each successful load; derived views
/// are recomputed from scratch rather than updated in place. Header order
/// determines default column presentation order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset from an ordered header list and parsed rows.
    ///
    /// Duplicate header names are dropped, keeping the first occurrence, so
    /// the stored header list is always unique and ordered.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        let mut seen = AHashSet::with_capacity(headers.len());
        let headers = headers
            .into_iter()
            .filter(|h| seen.insert(h.clone()))
            .collect();
        Self { headers, rows }
    }

    /// Ordered, unique header names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `name` is one of the headers.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}
