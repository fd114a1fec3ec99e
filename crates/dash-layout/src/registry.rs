//! Ordered widget collection with validated reordering

use ahash::AHashSet;
use tracing::warn;

use dash_core::{WidgetDescriptor, WidgetId, WidgetKind};

use crate::LayoutStore;

/// Apply a proposed ordering to `current`, accepting it only when it is an
/// exact permutation of the current ids.
///
/// A mismatched proposal (a drag event that fired mid-update, a stale id
/// list) leaves the order unchanged rather than silently dropping or
/// duplicating entries. Decoupled from any pointer/drag event system so the
/// policy is testable on its own.
pub fn reorder(current: &[WidgetId], proposed: &[WidgetId]) -> (Vec<WidgetId>, bool) {
    if proposed.len() != current.len() {
        return (current.to_vec(), false);
    }

    let current_set: AHashSet<&WidgetId> = current.iter().collect();
    let mut seen = AHashSet::with_capacity(proposed.len());
    for id in proposed {
        if !current_set.contains(id) || !seen.insert(id) {
            return (current.to_vec(), false);
        }
    }

    (proposed.to_vec(), true)
}

/// The ordered collection of widget descriptors, the single source of truth
/// for dashboard layout.
///
/// Constructed once with an injected store and passed by handle to the
/// orchestrator. Every mutation is written through; persistence failures
/// are logged and never block the mutation itself.
pub struct WidgetRegistry {
    widgets: Vec<WidgetDescriptor>,
    store: Box<dyn LayoutStore>,
}

impl WidgetRegistry {
    /// Restore the registry from `store`.
    ///
    /// A missing or corrupt stored value yields an empty collection, not an
    /// error.
    pub fn new(store: Box<dyn LayoutStore>) -> Self {
        let widgets = match store.load() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<WidgetDescriptor>>(&payload) {
                Ok(widgets) => widgets
                    .into_iter()
                    .map(WidgetDescriptor::ensure_title)
                    .collect(),
                Err(e) => {
                    warn!("discarding corrupt layout payload: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("failed to read persisted layout: {}", e);
                Vec::new()
            }
        };

        Self { widgets, store }
    }

    /// Append a new widget of `kind` with a fresh id and a title derived
    /// from the kind.
    pub fn add(&mut self, kind: WidgetKind) -> WidgetDescriptor {
        let descriptor = WidgetDescriptor::new(kind);
        self.widgets.push(descriptor.clone());
        self.persist();
        descriptor
    }

    /// Remove the widget with `id`; a no-op when absent.
    pub fn remove(&mut self, id: &str) {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        if self.widgets.len() != before {
            self.persist();
        }
    }

    /// Replace the collection order with `proposed_ids`.
    ///
    /// Rejected (returning false and keeping the previous order) unless the
    /// proposal is an exact permutation of the current id set.
    pub fn reorder(&mut self, proposed_ids: &[WidgetId]) -> bool {
        let current: Vec<WidgetId> = self.widgets.iter().map(|w| w.id.clone()).collect();
        let (order, accepted) = reorder(&current, proposed_ids);
        if !accepted {
            warn!("rejected reorder: proposal is not a permutation of the current widgets");
            return false;
        }

        self.widgets
            .sort_by_key(|w| order.iter().position(|id| id == &w.id));
        self.persist();
        true
    }

    /// The widgets in display order.
    pub fn list(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Serialize the current collection and write it through the store.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.widgets) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("failed to serialize layout: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&payload) {
            warn!("failed to persist layout: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::Arc;

    fn registry() -> WidgetRegistry {
        WidgetRegistry::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut registry = registry();

        let table = registry.add(WidgetKind::Table);
        let bar = registry.add(WidgetKind::Bar);

        let ids: Vec<&str> = registry.list().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec![table.id.as_str(), bar.id.as_str()]);
        assert_eq!(registry.list()[1].title, "Bar");
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut registry = registry();
        registry.add(WidgetKind::Line);

        registry.remove("no-such-id");

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reorder_applies_permutation() {
        let mut registry = registry();
        let w1 = registry.add(WidgetKind::Table).id;
        let w2 = registry.add(WidgetKind::Bar).id;
        let w3 = registry.add(WidgetKind::Line).id;

        assert!(registry.reorder(&[w3.clone(), w1.clone(), w2.clone()]));

        let ids: Vec<&str> = registry.list().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec![w3.as_str(), w1.as_str(), w2.as_str()]);
    }

    #[test]
    fn test_incomplete_reorder_is_rejected() {
        let mut registry = registry();
        let w1 = registry.add(WidgetKind::Table).id;
        let w2 = registry.add(WidgetKind::Bar).id;
        let w3 = registry.add(WidgetKind::Line).id;

        // Missing w3, as when a drag event fires mid-update
        assert!(!registry.reorder(&[w1.clone(), w2.clone()]));
        // Duplicated id
        assert!(!registry.reorder(&[w1.clone(), w1.clone(), w2.clone()]));
        // Unknown id
        assert!(!registry.reorder(&[w1.clone(), w2.clone(), "ghost".to_string()]));

        let ids: Vec<&str> = registry.list().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec![w1.as_str(), w2.as_str(), w3.as_str()]);
    }

    #[test]
    fn test_pure_reorder_reports_acceptance() {
        let current = vec!["a".to_string(), "b".to_string()];

        let (order, accepted) = reorder(&current, &["b".to_string(), "a".to_string()]);
        assert!(accepted);
        assert_eq!(order, vec!["b".to_string(), "a".to_string()]);

        let (order, accepted) = reorder(&current, &["b".to_string()]);
        assert!(!accepted);
        assert_eq!(order, current);
    }

    #[test]
    fn test_layout_round_trips_through_store() {
        let store = Arc::new(MemoryStore::new());

        let mut registry = WidgetRegistry::new(Box::new(store.clone()));
        let w1 = registry.add(WidgetKind::Table);
        let w2 = registry.add(WidgetKind::StackedArea);
        registry.reorder(&[w2.id.clone(), w1.id.clone()]);

        let restored = WidgetRegistry::new(Box::new(store));
        assert_eq!(restored.list(), &[w2, w1]);
    }

    #[test]
    fn test_corrupt_payload_restores_empty() {
        let store = MemoryStore::with_payload("not json at all");

        let registry = WidgetRegistry::new(Box::new(store));

        assert!(registry.is_empty());
    }

    #[test]
    fn test_mutations_survive_write_failure() {
        struct FailingStore;

        impl LayoutStore for FailingStore {
            fn load(&self) -> anyhow::Result<Option<String>> {
                Ok(None)
            }

            fn save(&self, _payload: &str) -> anyhow::Result<()> {
                anyhow::bail!("disk full")
            }
        }

        let mut registry = WidgetRegistry::new(Box::new(FailingStore));
        registry.add(WidgetKind::Bar);

        assert_eq!(registry.len(), 1);
    }
}
