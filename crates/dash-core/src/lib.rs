//! Core types for the data exploration dashboard
//!
//! This crate provides the fundamental data structures shared by the rest of
//! the workspace: the in-memory dataset, widget descriptors, and the event
//! bus used to announce state changes.

pub mod dataset;
pub mod events;
pub mod widget;

// Re-export commonly used types
pub use dataset::{Dataset, Row};
pub use events::EventBus;
pub use widget::{WidgetDescriptor, WidgetId, WidgetKind};
