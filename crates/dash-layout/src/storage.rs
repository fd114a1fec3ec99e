//! Storage backends for the persisted layout

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

/// Load/save contract for the serialized layout.
///
/// The payload is an opaque string (a JSON array of widget descriptors).
/// The backend's single storage slot is treated as stable across sessions
/// and is not versioned; schema drift is absorbed by tolerant
/// deserialization, not migration.
pub trait LayoutStore: Send + Sync {
    /// Read the stored payload, `None` when nothing was ever saved.
    fn load(&self) -> anyhow::Result<Option<String>>;

    /// Replace the stored payload.
    fn save(&self, payload: &str) -> anyhow::Result<()>;
}

impl<S: LayoutStore + ?Sized> LayoutStore for Arc<S> {
    fn load(&self) -> anyhow::Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, payload: &str) -> anyhow::Result<()> {
        (**self).save(payload)
    }
}

/// In-memory store with local-storage-like semantics.
///
/// The default test double, and a fit for hosts that hand the payload to
/// their own storage (a browser shell would wire the slot to local storage).
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot, e.g. with a payload captured from a previous session.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
        }
    }
}

impl LayoutStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, payload: &str) -> anyhow::Result<()> {
        *self.slot.lock() = Some(payload.to_string());
        Ok(())
    }
}

/// File-backed store keeping the layout as a JSON file on disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LayoutStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, payload: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}
