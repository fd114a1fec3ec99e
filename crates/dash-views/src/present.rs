//! Display ordering and truncation of aggregated records

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::AggregateRecord;

/// Number of records shown while the "show all" toggle is off.
pub const VISIBLE_HEAD: usize = 7;

/// Fields of an aggregate record that can drive an explicit sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Key,
    Sum,
    Avg,
    Min,
    Max,
    Count,
    Median,
    Mode,
}

/// Direction of an explicit column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort selection, driven by column-header clicks.
///
/// With no explicit column the baseline view orders by descending sum, so
/// the most significant groups come first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl SortState {
    /// Register a click on `column`: the same column flips direction, a new
    /// column resets to ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Order and truncate `records` for display.
///
/// Returns a new sequence; the input is never mutated and identical inputs
/// produce identical output order. Truncation is purely a display window
/// over the sorted sequence and never re-triggers aggregation.
pub fn present(records: &[AggregateRecord], sort: &SortState, show_all: bool) -> Vec<AggregateRecord> {
    let mut out = records.to_vec();

    match sort.column {
        None => out.sort_by(|a, b| b.sum.total_cmp(&a.sum)),
        Some(column) => out.sort_by(|a, b| {
            let ordering = compare(a, b, column);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }),
    }

    if !show_all {
        out.truncate(VISIBLE_HEAD);
    }
    out
}

/// Generic column comparison: the key compares as a string, everything else
/// numerically.
fn compare(a: &AggregateRecord, b: &AggregateRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Key => a.key.cmp(&b.key),
        SortColumn::Sum => a.sum.total_cmp(&b.sum),
        SortColumn::Avg => a.avg.total_cmp(&b.avg),
        SortColumn::Min => a.min.total_cmp(&b.min),
        SortColumn::Max => a.max.total_cmp(&b.max),
        SortColumn::Count => a.count.cmp(&b.count),
        SortColumn::Median => a.median.total_cmp(&b.median),
        SortColumn::Mode => a.mode.total_cmp(&b.mode),
    }
}
