//! Aggregation engine and presentation layer for the dashboard
//!
//! Turns raw string-cell datasets into grouped numeric summaries, orders and
//! truncates them for display, and shapes the result for each widget kind.

mod aggregate;
mod present;
mod render;
mod summary;

pub use aggregate::{aggregate, parse_numeric, AggregateRecord};
pub use present::{present, SortColumn, SortDirection, SortState, VISIBLE_HEAD};
pub use render::{render, ChartSeries, RenderData, TableData};
pub use summary::{summarize_columns, ColumnSummary, NumericSummary};
