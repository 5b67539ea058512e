//! Greeting collection storage.
//!
//! The whole collection lives in a single pretty-printed JSON file:
//! ```text
//! <DATA_DIR>/data.json
//! ```
//! Every `load` reads the full document and every `save` rewrites it; there
//! is no caching between calls. Writes go through a temp file and rename so
//! the document is never left partially written.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::Greeting;

/// Errors that can occur reading or writing the data file.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing the file.
    Io(PathBuf, io::Error),
    /// File contents are not a JSON array of greetings.
    Corrupt(PathBuf, serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::Corrupt(path, e) => {
                write!(f, "Malformed greeting data in {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(_, e) => Some(e),
            StorageError::Corrupt(_, e) => Some(e),
        }
    }
}

/// File-backed store for the greeting collection.
///
/// Holds only the path of the data file; every operation goes to disk.
/// Creating the file on first run is the caller's job.
#[derive(Debug, Clone)]
pub struct GreetingStore {
    path: PathBuf,
}

impl GreetingStore {
    /// Creates a store over the given data file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full greeting collection.
    pub fn load(&self) -> Result<Vec<Greeting>, StorageError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::Io(self.path.clone(), e))?;

        serde_json::from_str(&contents).map_err(|e| StorageError::Corrupt(self.path.clone(), e))
    }

    /// Saves the full greeting collection, replacing the previous document.
    ///
    /// Writes to a temp file and renames it over the data file, so a failed
    /// write leaves the previous document intact.
    pub fn save(&self, greetings: &[Greeting]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(greetings)
            .map_err(|e| StorageError::Corrupt(self.path.clone(), e))?;

        let temp_path = self.path.with_extension("json.tmp");

        let mut file =
            File::create(&temp_path).map_err(|e| StorageError::Io(temp_path.clone(), e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| StorageError::Io(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StorageError::Io(temp_path.clone(), e))?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &self.path).map_err(|e| StorageError::Io(self.path.clone(), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (GreetingStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = GreetingStore::new(temp_dir.path().join("data.json"));
        store.save(&[]).unwrap();
        (store, temp_dir)
    }

    fn greeting(id: u64, language: &str, text: &str, formal: bool) -> Greeting {
        Greeting {
            id,
            language: language.to_string(),
            greeting: text.to_string(),
            formal,
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (store, _temp) = setup();

        let greetings = vec![
            greeting(1, "English", "Hello", false),
            greeting(2, "French", "Bonjour", true),
        ];
        store.save(&greetings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, greetings);
    }

    #[test]
    fn test_empty_collection_roundtrip() {
        let (store, _temp) = setup();

        let loaded = store.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = GreetingStore::new(temp_dir.path().join("missing.json"));

        let result = store.load();
        assert!(matches!(result, Err(StorageError::Io(_, _))));
    }

    #[test]
    fn test_load_corrupt_file() {
        let (store, _temp) = setup();
        fs::write(store.path(), "not json at all").unwrap();

        let result = store.load();
        assert!(matches!(result, Err(StorageError::Corrupt(_, _))));
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let (store, _temp) = setup();
        fs::write(store.path(), r#"{"id": 1}"#).unwrap();

        let result = store.load();
        assert!(matches!(result, Err(StorageError::Corrupt(_, _))));
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let (store, _temp) = setup();

        store
            .save(&[greeting(1, "English", "Hello", false)])
            .unwrap();
        store
            .save(&[greeting(1, "Spanish", "Hola", false)])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].language, "Spanish");
    }

    #[test]
    fn test_save_is_pretty_printed() {
        let (store, _temp) = setup();

        store
            .save(&[greeting(1, "English", "Hello", false)])
            .unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("[\n"));
        assert!(contents.contains("\"id\": 1"));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (store, _temp) = setup();

        store
            .save(&[greeting(1, "English", "Hello", false)])
            .unwrap();

        assert!(!store.path().with_extension("json.tmp").exists());
    }
}
