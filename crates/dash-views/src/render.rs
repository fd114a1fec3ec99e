//! Rendering-ready shapes for each widget kind

use serde::Serialize;

use dash_core::WidgetKind;

use crate::AggregateRecord;

/// A single numeric series for chart-style widgets.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    /// Series caption, e.g. "sales (Sum)"
    pub label: String,
    /// Group keys in display order
    pub labels: Vec<String>,
    /// Per-group sums aligned with `labels`
    pub values: Vec<f64>,
}

/// Table-shaped output: column captions plus the full aggregate rows.
#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub records: Vec<AggregateRecord>,
}

/// Data ready for a specific visualization kind, sufficient for any chart or
/// table renderer to display without further data knowledge.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderData {
    Table(TableData),
    Bar(ChartSeries),
    Line(ChartSeries),
    StackedArea(ChartSeries),
}

/// Shape presented records for `kind`.
///
/// Exhaustive over the widget kinds: adding a kind does not compile until
/// every renderer handles it.
pub fn render(
    kind: WidgetKind,
    records: &[AggregateRecord],
    key_label: &str,
    value_label: &str,
) -> RenderData {
    match kind {
        WidgetKind::Table => RenderData::Table(TableData {
            columns: vec![
                key_label.to_string(),
                format!("{} (Sum)", value_label),
                "Avg".to_string(),
                "Min".to_string(),
                "Max".to_string(),
                "Count".to_string(),
                "Median".to_string(),
                "Mode".to_string(),
            ],
            records: records.to_vec(),
        }),
        WidgetKind::Bar => RenderData::Bar(series(records, value_label, "Sum")),
        WidgetKind::Line => RenderData::Line(series(records, value_label, "Line")),
        WidgetKind::StackedArea => {
            RenderData::StackedArea(series(records, value_label, "Stacked Area"))
        }
    }
}

fn series(records: &[AggregateRecord], value_label: &str, caption: &str) -> ChartSeries {
    ChartSeries {
        label: format!("{} ({})", value_label, caption),
        labels: records.iter().map(|r| r.key.clone()).collect(),
        values: records.iter().map(|r| r.sum).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, sum: f64) -> AggregateRecord {
        AggregateRecord {
            key: key.to_string(),
            sum,
            avg: sum,
            min: sum,
            max: sum,
            count: 1,
            median: sum,
            mode: sum,
        }
    }

    #[test]
    fn test_chart_series_aligns_labels_and_sums() {
        let records = vec![record("east", 30.0), record("west", 5.0)];

        let data = render(WidgetKind::Bar, &records, "region", "sales");

        match data {
            RenderData::Bar(series) => {
                assert_eq!(series.label, "sales (Sum)");
                assert_eq!(series.labels, vec!["east", "west"]);
                assert_eq!(series.values, vec![30.0, 5.0]);
            }
            other => panic!("expected bar data, got {:?}", other),
        }
    }

    #[test]
    fn test_table_columns_carry_axis_labels() {
        let records = vec![record("east", 30.0)];

        let data = render(WidgetKind::Table, &records, "region", "sales");

        match data {
            RenderData::Table(table) => {
                assert_eq!(table.columns[0], "region");
                assert_eq!(table.columns[1], "sales (Sum)");
                assert_eq!(table.records.len(), 1);
            }
            other => panic!("expected table data, got {:?}", other),
        }
    }

    #[test]
    fn test_every_kind_renders() {
        let records = vec![record("east", 30.0)];

        for kind in WidgetKind::all() {
            let data = render(kind, &records, "region", "sales");
            let json = serde_json::to_value(&data).unwrap();
            assert!(json.get("type").is_some());
        }
    }
}
