//! Browser LocalStorage backend (WASM only)

use super::{PersistError, ProgressStore};

/// Stores the record under a single LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistError::Unavailable("LocalStorage not available".into()))
    }
}

impl ProgressStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }

    fn save(&mut self, json: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(&self.key, json)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))
    }
}
