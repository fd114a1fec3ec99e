//! Widget descriptors, the persisted unit of dashboard layout

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a widget.
///
/// Kept as a string so persisted layouts stay readable and stable across
/// schema changes.
pub type WidgetId = String;

/// The closed set of visualizations a widget can render.
///
/// Render dispatch matches exhaustively over this enum, so adding a kind is
/// a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKind {
    Table,
    Bar,
    Line,
    StackedArea,
}

impl WidgetKind {
    /// Human-readable name, used to derive default widget titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            WidgetKind::Table => "Table",
            WidgetKind::Bar => "Bar",
            WidgetKind::Line => "Line",
            WidgetKind::StackedArea => "Stacked Area",
        }
    }

    /// All kinds, in presentation order.
    pub fn all() -> [WidgetKind; 4] {
        [
            WidgetKind::Table,
            WidgetKind::Bar,
            WidgetKind::Line,
            WidgetKind::StackedArea,
        ]
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A persisted unit of dashboard layout.
///
/// The ordered collection of descriptors is the single source of truth for
/// what the dashboard shows and in what order. Deserialization tolerates
/// unknown fields and a missing title so payloads written by other revisions
/// load without migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Unique identifier
    pub id: WidgetId,

    /// Visualization kind
    pub kind: WidgetKind,

    /// Display title shown in the widget header
    #[serde(default)]
    pub title: String,
}

impl WidgetDescriptor {
    /// Create a descriptor with a fresh id and a title derived from `kind`.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            title: kind.display_name().to_string(),
        }
    }

    /// Fill an empty title from the kind's display name.
    pub fn ensure_title(mut self) -> Self {
        if self.title.is_empty() {
            self.title = self.kind.display_name().to_string();
        }
        self
    }
}
