//! String key-value storage abstraction.
//!
//! Stand-in for browser local storage: flat string keys, whole-value
//! overwrites, no transactions. [`MemoryStore`] backs tests;
//! [`JsonFileStore`] persists the map as a single JSON object on disk
//! for the CLI.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::CommonError;

/// Key-value store abstraction for persisted admin state
pub trait KeyValueStore {
    /// Read a value, `None` when absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any existing one
    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError>;

    /// Remove a value if present
    fn remove(&mut self, key: &str) -> Result<(), CommonError>;
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CommonError> {
        self.values.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object per file.
///
/// Every write rewrites the whole file, matching the single-writer,
/// whole-snapshot persistence model.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store, loading existing values when the file exists.
    ///
    /// An unreadable or malformed file starts the store empty rather
    /// than failing: persisted state is best-effort everywhere in this
    /// system.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), CommonError> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| CommonError::Store(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CommonError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), CommonError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
