//! Best-effort persistence for the economy record
//!
//! Features:
//! - Single flat JSON record under one storage key
//! - Pluggable backends (LocalStorage on web, a JSON file on native, memory for tests)
//! - Failures are reported as `PersistError` and never escape the economy store

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Why a load or save did not go through
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result of a best-effort save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
}

/// Raw storage for the serialized record
pub trait ProgressStore {
    /// Stored JSON, or `None` if nothing was saved yet
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Replace the stored JSON
    fn save(&mut self, json: &str) -> Result<(), PersistError>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    data: Option<String>,
    fail_loads: bool,
    fail_saves: bool,
    saves: usize,
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after handing one to the economy.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `json`
    pub fn with_data(json: impl Into<String>) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().data = Some(json.into());
        store
    }

    /// Currently stored JSON
    pub fn data(&self) -> Option<String> {
        self.inner.borrow().data.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.inner.borrow_mut().fail_loads = fail;
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        let inner = self.inner.borrow();
        if inner.fail_loads {
            return Err(PersistError::Unavailable("memory store load disabled".into()));
        }
        Ok(inner.data.clone())
    }

    fn save(&mut self, json: &str) -> Result<(), PersistError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(PersistError::Unavailable("memory store save disabled".into()));
        }
        inner.data = Some(json.to_string());
        inner.saves += 1;
        Ok(())
    }
}
