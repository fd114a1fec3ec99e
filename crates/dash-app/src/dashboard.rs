//! Dashboard orchestrator

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use dash_core::events::events::{
    AxesChanged, DatasetLoaded, LayoutReordered, WidgetAdded, WidgetRemoved,
};
use dash_core::{Dataset, EventBus, WidgetDescriptor, WidgetId, WidgetKind};
use dash_data::TableSource;
use dash_layout::{LayoutStore, WidgetRegistry};
use dash_views::{
    aggregate, present, render, summarize_columns, AggregateRecord, ColumnSummary, RenderData,
    SortState,
};

/// Currently selected axis columns, shared by every widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisSelection {
    /// Key (x) column rows are grouped by
    pub key_column: Option<String>,
    /// Value (y) column statistics are computed over
    pub value_column: Option<String>,
}

struct DataState {
    dataset: Arc<Dataset>,
    axes: AxisSelection,
    /// Epoch of the load that produced `dataset`
    committed_epoch: u64,
}

/// The composition root: owns the current dataset, the axis selections and
/// the widget registry, and produces render data per widget.
///
/// Axis selections are global across the dashboard; widgets differ only in
/// visualization kind.
pub struct Dashboard {
    state: RwLock<DataState>,
    registry: Mutex<WidgetRegistry>,
    events: Arc<EventBus>,
    next_epoch: AtomicU64,
}

impl Dashboard {
    /// Create a dashboard, restoring its layout from `store`.
    pub fn new(store: Box<dyn LayoutStore>) -> Self {
        let registry = WidgetRegistry::new(store);
        info!("restored layout with {} widgets", registry.len());

        Self {
            state: RwLock::new(DataState {
                dataset: Arc::new(Dataset::default()),
                axes: AxisSelection::default(),
                committed_epoch: 0,
            }),
            registry: Mutex::new(registry),
            events: Arc::new(EventBus::new()),
            next_epoch: AtomicU64::new(0),
        }
    }

    /// Event bus announcing dataset, axis and layout changes.
    pub fn events(&self) -> Arc<EventBus> {
        self.events.clone()
    }

    /// Decode `source` and install the result as the current dataset.
    ///
    /// The decode is the only suspend point in the system; operations
    /// against the previous dataset stay valid while it runs, and the new
    /// dataset plus re-derived axis selections become visible as a single
    /// update. When several loads overlap, the one started last wins; an
    /// earlier decode finishing late is discarded. Returns whether this
    /// load's dataset was installed.
    pub async fn load_source(&self, source: &dyn TableSource) -> anyhow::Result<bool> {
        let epoch = self.next_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let dataset = Arc::new(source.load().await?);

        {
            let mut state = self.state.write();
            if state.committed_epoch > epoch {
                info!(
                    "discarding superseded load from {}",
                    source.source_name()
                );
                return Ok(false);
            }
            state.axes = rederive_axes(&state.axes, dataset.headers());
            state.dataset = dataset.clone();
            state.committed_epoch = epoch;
        }

        self.events.publish(DatasetLoaded {
            source_name: source.source_name().to_string(),
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
        });
        Ok(true)
    }

    /// Select the key (x) column.
    ///
    /// A name that is not a dataset header is accepted as a degraded mode;
    /// aggregation then yields nothing useful until the dataset changes.
    pub fn set_key_column(&self, name: impl Into<String>) {
        let name = name.into();
        {
            let mut state = self.state.write();
            if !state.dataset.has_column(&name) {
                warn!("selected key column '{}' is not a dataset header", name);
            }
            state.axes.key_column = Some(name);
        }
        self.publish_axes();
    }

    /// Select the value (y) column.
    pub fn set_value_column(&self, name: impl Into<String>) {
        let name = name.into();
        {
            let mut state = self.state.write();
            if !state.dataset.has_column(&name) {
                warn!("selected value column '{}' is not a dataset header", name);
            }
            state.axes.value_column = Some(name);
        }
        self.publish_axes();
    }

    /// The current dataset (replaced wholesale by `load_source`).
    pub fn dataset(&self) -> Arc<Dataset> {
        self.state.read().dataset.clone()
    }

    /// The current axis selections.
    pub fn axes(&self) -> AxisSelection {
        self.state.read().axes.clone()
    }

    /// Append a widget of `kind` to the layout.
    pub fn add_widget(&self, kind: WidgetKind) -> WidgetDescriptor {
        let descriptor = self.registry.lock().add(kind);
        self.events.publish(WidgetAdded {
            widget_id: descriptor.id.clone(),
            kind: kind.display_name().to_string(),
        });
        descriptor
    }

    /// Remove the widget with `id`; a no-op when absent.
    pub fn remove_widget(&self, id: &str) {
        self.registry.lock().remove(id);
        self.events.publish(WidgetRemoved {
            widget_id: id.to_string(),
        });
    }

    /// Reorder the layout to `proposed_ids`, rejecting anything that is not
    /// a permutation of the current widgets.
    pub fn reorder_widgets(&self, proposed_ids: &[WidgetId]) -> bool {
        let accepted = self.registry.lock().reorder(proposed_ids);
        if accepted {
            self.events.publish(LayoutReordered {
                order: proposed_ids.to_vec(),
            });
        }
        accepted
    }

    /// The widgets in display order.
    pub fn widgets(&self) -> Vec<WidgetDescriptor> {
        self.registry.lock().list().to_vec()
    }

    /// Aggregate the current dataset along the selected axes.
    pub fn aggregate_current(&self) -> Vec<AggregateRecord> {
        let (dataset, axes) = self.snapshot();
        match (axes.key_column, axes.value_column) {
            (Some(key), Some(value)) => aggregate(&dataset, &key, &value),
            _ => Vec::new(),
        }
    }

    /// Produce display-ready data for every widget, in layout order.
    ///
    /// Aggregation and presentation run once; each widget then shapes the
    /// shared presented records for its own kind.
    pub fn render_widgets(
        &self,
        sort: &SortState,
        show_all: bool,
    ) -> Vec<(WidgetDescriptor, RenderData)> {
        let (dataset, axes) = self.snapshot();
        let (key, value) = match (axes.key_column, axes.value_column) {
            (Some(key), Some(value)) => (key, value),
            _ => return Vec::new(),
        };

        let records = aggregate(&dataset, &key, &value);
        let presented = present(&records, sort, show_all);

        self.widgets()
            .into_iter()
            .map(|descriptor| {
                let data = render(descriptor.kind, &presented, &key, &value);
                (descriptor, data)
            })
            .collect()
    }

    /// Per-column statistics over the whole current dataset.
    pub fn column_summaries(&self) -> Vec<ColumnSummary> {
        summarize_columns(&self.dataset())
    }

    fn snapshot(&self) -> (Arc<Dataset>, AxisSelection) {
        let state = self.state.read();
        (state.dataset.clone(), state.axes.clone())
    }

    fn publish_axes(&self) {
        let axes = self.axes();
        self.events.publish(AxesChanged {
            key_column: axes.key_column,
            value_column: axes.value_column,
        });
    }
}

/// First/second-header axis defaults.
fn default_axes(headers: &[String]) -> AxisSelection {
    AxisSelection {
        key_column: headers.first().cloned(),
        value_column: headers.get(1).or_else(|| headers.first()).cloned(),
    }
}

/// Keep axis selections that still name a header; re-derive the
/// first/second-header defaults for any that no longer do.
fn rederive_axes(current: &AxisSelection, headers: &[String]) -> AxisSelection {
    let defaults = default_axes(headers);
    let keep = |selection: &Option<String>, fallback: Option<String>| match selection {
        Some(name) if headers.iter().any(|h| h == name) => Some(name.clone()),
        _ => fallback,
    };

    AxisSelection {
        key_column: keep(&current.key_column, defaults.key_column),
        value_column: keep(&current.value_column, defaults.value_column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dash_core::Row;
    use dash_data::{DataError, StaticSource};
    use dash_layout::MemoryStore;
    use std::time::Duration;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn dataset(headers: &[&str], rows: &[&[(&str, &str)]]) -> Dataset {
        Dataset::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|pairs| {
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<Row>()
                })
                .collect(),
        )
    }

    fn sales_dataset() -> Dataset {
        dataset(
            &["region", "sales"],
            &[
                &[("region", "east"), ("sales", "10")],
                &[("region", "east"), ("sales", "20")],
                &[("region", "west"), ("sales", "bad")],
            ],
        )
    }

    /// Source that sleeps before producing its dataset, for racing loads.
    struct DelayedSource {
        name: String,
        dataset: Dataset,
        delay: Duration,
    }

    #[async_trait]
    impl TableSource for DelayedSource {
        async fn load(&self) -> Result<Dataset, DataError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.dataset.clone())
        }

        fn source_name(&self) -> &str {
            &self.name
        }
    }

    #[tokio::test]
    async fn test_load_derives_default_axes() {
        init_tracing();
        let dashboard = Dashboard::new(Box::new(MemoryStore::new()));

        let source = StaticSource::new("sales.csv", sales_dataset());
        assert!(dashboard.load_source(&source).await.unwrap());

        let axes = dashboard.axes();
        assert_eq!(axes.key_column.as_deref(), Some("region"));
        assert_eq!(axes.value_column.as_deref(), Some("sales"));
    }

    #[tokio::test]
    async fn test_end_to_end_render() {
        init_tracing();
        let dashboard = Dashboard::new(Box::new(MemoryStore::new()));
        let source = StaticSource::new("sales.csv", sales_dataset());
        dashboard.load_source(&source).await.unwrap();

        dashboard.add_widget(WidgetKind::Table);
        dashboard.add_widget(WidgetKind::Bar);

        let rendered = dashboard.render_widgets(&SortState::default(), false);
        assert_eq!(rendered.len(), 2);

        // Only "east" had valid contributions; "west" is absent entirely
        match &rendered[0].1 {
            RenderData::Table(table) => {
                assert_eq!(table.records.len(), 1);
                let east = &table.records[0];
                assert_eq!(east.key, "east");
                assert_eq!(east.sum, 30.0);
                assert_eq!(east.avg, 15.0);
                assert_eq!(east.count, 2);
                assert_eq!(east.median, 15.0);
            }
            other => panic!("expected table data, got {:?}", other),
        }
        match &rendered[1].1 {
            RenderData::Bar(series) => {
                assert_eq!(series.labels, vec!["east"]);
                assert_eq!(series.values, vec![30.0]);
            }
            other => panic!("expected bar data, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_axes_rederived_when_headers_change() {
        init_tracing();
        let dashboard = Dashboard::new(Box::new(MemoryStore::new()));

        let first = StaticSource::new("sales.csv", sales_dataset());
        dashboard.load_source(&first).await.unwrap();
        dashboard.set_key_column("region");

        let second = StaticSource::new(
            "revenue.csv",
            dataset(
                &["country", "revenue"],
                &[&[("country", "de"), ("revenue", "1")]],
            ),
        );
        dashboard.load_source(&second).await.unwrap();

        let axes = dashboard.axes();
        assert_eq!(axes.key_column.as_deref(), Some("country"));
        assert_eq!(axes.value_column.as_deref(), Some("revenue"));
    }

    #[tokio::test]
    async fn test_valid_axes_survive_reload() {
        init_tracing();
        let dashboard = Dashboard::new(Box::new(MemoryStore::new()));

        let source = StaticSource::new(
            "sales.csv",
            dataset(
                &["region", "sales", "units"],
                &[&[("region", "east"), ("sales", "10"), ("units", "2")]],
            ),
        );
        dashboard.load_source(&source).await.unwrap();
        dashboard.set_value_column("units");

        dashboard.load_source(&source).await.unwrap();

        assert_eq!(dashboard.axes().value_column.as_deref(), Some("units"));
    }

    #[tokio::test]
    async fn test_later_load_wins_over_slower_earlier_one() {
        init_tracing();
        let dashboard = Arc::new(Dashboard::new(Box::new(MemoryStore::new())));

        let slow = DelayedSource {
            name: "slow.csv".into(),
            dataset: dataset(&["a"], &[&[("a", "1")]]),
            delay: Duration::from_millis(50),
        };
        let fast = DelayedSource {
            name: "fast.csv".into(),
            dataset: dataset(&["b"], &[&[("b", "2")], &[("b", "3")]]),
            delay: Duration::from_millis(1),
        };

        // The slow load starts first, the fast one supersedes it
        let (slow_installed, fast_installed) =
            tokio::join!(dashboard.load_source(&slow), dashboard.load_source(&fast));

        assert!(!slow_installed.unwrap());
        assert!(fast_installed.unwrap());
        assert_eq!(dashboard.dataset().headers(), &["b".to_string()]);
        assert_eq!(dashboard.dataset().row_count(), 2);
    }

    #[tokio::test]
    async fn test_layout_survives_restart() {
        init_tracing();
        let store = Arc::new(MemoryStore::new());

        let dashboard = Dashboard::new(Box::new(store.clone()));
        let w1 = dashboard.add_widget(WidgetKind::Line);
        let w2 = dashboard.add_widget(WidgetKind::StackedArea);
        dashboard.reorder_widgets(&[w2.id.clone(), w1.id.clone()]);

        let restarted = Dashboard::new(Box::new(store));
        assert_eq!(restarted.widgets(), vec![w2, w1]);
    }

    #[tokio::test]
    async fn test_render_without_dataset_is_empty() {
        init_tracing();
        let dashboard = Dashboard::new(Box::new(MemoryStore::new()));
        dashboard.add_widget(WidgetKind::Table);

        assert!(dashboard.render_widgets(&SortState::default(), true).is_empty());
        assert!(dashboard.aggregate_current().is_empty());
    }
}
