//! Widget registry and layout persistence
//!
//! Maintains the ordered collection of widget descriptors that defines the
//! dashboard layout, and persists it through an injected storage backend.

mod registry;
mod storage;

pub use registry::{reorder, WidgetRegistry};
pub use storage::{FileStore, LayoutStore, MemoryStore};
