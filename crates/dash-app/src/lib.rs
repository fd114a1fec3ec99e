//! Composition root for the data exploration dashboard
//!
//! Wires the ingestion boundary, aggregation engine, presentation layer and
//! widget registry together behind a single `Dashboard` handle that a UI
//! shell drives.

mod dashboard;

pub use dashboard::{AxisSelection, Dashboard};

// Re-export the surface a UI shell needs
pub use dash_core::{Dataset, EventBus, Row, WidgetDescriptor, WidgetId, WidgetKind};
pub use dash_data::{CsvSource, DataError, StaticSource, TableSource};
pub use dash_layout::{FileStore, LayoutStore, MemoryStore, WidgetRegistry};
pub use dash_views::{
    aggregate, present, render, summarize_columns, AggregateRecord, ChartSeries, ColumnSummary,
    RenderData, SortColumn, SortDirection, SortState, TableData, VISIBLE_HEAD,
};
