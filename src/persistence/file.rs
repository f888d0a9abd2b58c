//! JSON file backend (native)

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{PersistError, ProgressStore};

/// Stores the record in a single file, written through a temp file and rename
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, json: &str) -> Result<(), PersistError> {
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("badger_run_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = FileStore::new(temp_file("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_file("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(r#"{"bankCoins":3}"#).unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some(r#"{"bankCoins":3}"#));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let mut store = FileStore::new(temp_file("no_such_dir").join("nested").join("save.json"));
        assert!(matches!(store.save("{}"), Err(PersistError::Io(_))));
    }
}
