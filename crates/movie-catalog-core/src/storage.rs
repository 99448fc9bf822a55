use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MOVIES_KEY: &str = "movies";
pub const DIRECTORS_KEY: &str = "directors";

/// A local key-value store holding serialized blobs
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Keep a copy of an unreadable value before it gets overwritten
    fn backup(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("Storage miss: {} (file does not exist)", key);
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Self::io_error(key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(key, e))?;

        // Atomic write: write to temp file, then rename
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(|e| Self::io_error(key, e))?;
        std::fs::rename(&temp_path, &path).map_err(|e| Self::io_error(key, e))?;
        Ok(())
    }

    fn backup(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            let backup_path = path.with_extension("json.bak");
            std::fs::copy(&path, &backup_path).map_err(|e| Self::io_error(key, e))?;
            info!("Backed up unreadable {} to {:?}", key, backup_path);
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backup(&mut self, key: &str) -> Result<(), StorageError> {
        if let Some(value) = self.entries.get(key).cloned() {
            self.entries.insert(format!("{}.bak", key), value);
        }
        Ok(())
    }
}

/// Read a whole collection. Missing blobs load as empty. Records that do not
/// decode are skipped and the rest kept; a blob that is not a JSON array
/// loads as empty. Either way the unreadable blob is backed up first.
pub fn load_collection<S, T>(store: &mut S, key: &str) -> Result<Vec<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(content) = store.get(key)? else {
        return Ok(Vec::new());
    };

    if content.trim().is_empty() || content.trim() == "null" {
        return Ok(Vec::new());
    }

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!("Stored {} is unreadable: {}. Starting with an empty collection.", key, e);
            backup_unreadable(store, key);
            return Ok(Vec::new());
        }
    };

    let total = records.len();
    let mut items = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<T>(record) {
            Ok(item) => items.push(item),
            Err(e) => warn!("Skipping unreadable {} record #{}: {}", key, index, e),
        }
    }

    if items.len() < total {
        warn!("Loaded {} of {} {} records", items.len(), total, key);
        backup_unreadable(store, key);
    } else {
        debug!("Loaded {} ({} items)", key, items.len());
    }
    Ok(items)
}

fn backup_unreadable<S: KeyValueStore + ?Sized>(store: &mut S, key: &str) {
    if let Err(backup_err) = store.backup(key) {
        warn!("Failed to back up unreadable {}: {}", key, backup_err);
    }
}

/// Overwrite a whole collection
pub fn save_collection<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string_pretty(items).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)?;
    debug!("Saved {} ({} items)", key, items.len());
    Ok(())
}
