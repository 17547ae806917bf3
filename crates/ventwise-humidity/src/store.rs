//! Persisted indoor conditions.
//!
//! A flat JSON object of string keys on disk; the indoor record lives under
//! [`INDOOR_KEY`]. Other keys in the file are preserved on write.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::reading::IndoorConditions;

pub const INDOOR_KEY: &str = "indoorConditions";

#[derive(Debug, Clone)]
pub struct IndoorStore {
    path: PathBuf,
}

impl IndoorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved record.
    ///
    /// A missing file, missing key or malformed entry yields empty conditions,
    /// the same state a first launch starts from.
    pub fn load(&self) -> Result<IndoorConditions, StoreError> {
        let entries = self.read_entries()?;

        let Some(value) = entries.get(INDOOR_KEY) else {
            return Ok(IndoorConditions::default());
        };

        match serde_json::from_value::<IndoorConditions>(value.clone()) {
            Ok(conditions) => {
                tracing::debug!("Loaded indoor conditions from {}", self.path.display());
                Ok(conditions)
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed indoor conditions entry: {}", e);
                Ok(IndoorConditions::default())
            }
        }
    }

    /// Persist the record, keeping any unrelated keys in the file.
    pub fn save(&self, conditions: &IndoorConditions) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(INDOOR_KEY.to_string(), serde_json::to_value(conditions)?);
        self.write_entries(&entries)?;

        tracing::info!("Saved indoor conditions to {}", self.path.display());
        Ok(())
    }

    /// Remove the record; a no-op when nothing was saved.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        if entries.remove(INDOOR_KEY).is_some() {
            self.write_entries(&entries)?;
            tracing::info!("Cleared indoor conditions");
        }
        Ok(())
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|source| self.read_error(source))?;

        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) | Err(_) => {
                tracing::warn!(
                    "Storage file {} is not a JSON object; starting fresh",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| self.write_error(source))
    }

    fn read_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> IndoorStore {
        IndoorStore::new(dir.path().join("nested").join("storage.json"))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), IndoorConditions::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let conditions = IndoorConditions::new("21.5", "48");

        store.save(&conditions).unwrap();
        assert_eq!(store.load().unwrap(), conditions);
    }

    #[test]
    fn test_record_is_stored_as_strings_under_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&IndoorConditions::new("70", "35")).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[INDOOR_KEY]["temperature"], Value::String("70".into()));
        assert_eq!(raw[INDOOR_KEY]["humidity"], Value::String("35".into()));
    }

    #[test]
    fn test_unrelated_keys_survive_save_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"theme":"dark"}"#).unwrap();

        store.save(&IndoorConditions::new("20", "50")).unwrap();
        store.clear().unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], Value::String("dark".into()));
        assert!(raw.get(INDOOR_KEY).is_none());
        assert_eq!(store.load().unwrap(), IndoorConditions::default());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        assert_eq!(store.load().unwrap(), IndoorConditions::default());
    }

    #[test]
    fn test_malformed_entry_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"indoorConditions": 42}"#).unwrap();

        assert_eq!(store.load().unwrap(), IndoorConditions::default());
    }

    #[test]
    fn test_partial_record_keeps_filled_field() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"indoorConditions": {"temperature": "19"}}"#).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.temperature, "19");
        assert!(loaded.humidity.is_empty());
        assert!(!loaded.is_complete());
    }
}
