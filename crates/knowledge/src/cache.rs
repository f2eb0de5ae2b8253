//! File-backed key/value cache under `.nivesh/cache/`.

use nivesh_core::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path of the workspace key/value store.
pub fn get_store_path(workspace: &Path) -> PathBuf {
    workspace.join(".nivesh").join("cache").join("store.json")
}

/// A JSON object persisted as a single file.
///
/// Each `set` rewrites the whole file; values are small and writes rare.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl KvStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                AppError::Knowledge(format!("Failed to read cache at {:?}: {}", path, e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                AppError::Knowledge(format!("Failed to parse cache at {:?}: {}", path, e))
            })?
        } else {
            Map::new()
        };

        tracing::debug!("Opened cache {:?} with {} keys", path, values.len());
        Ok(Self { path, values })
    }

    /// Open the store at `path`, starting empty if the file is unreadable.
    ///
    /// The next `set` overwrites a corrupt file.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Ignoring cache: {}", e);
                Self {
                    path,
                    values: Map::new(),
                }
            }
        }
    }

    /// Open the store for a workspace.
    pub fn for_workspace(workspace: &Path) -> AppResult<Self> {
        Self::open(get_store_path(workspace))
    }

    /// Read and decode a value.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.values.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Encode and persist a value.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> AppResult<()> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        self.flush()
    }

    /// Drop a key and persist.
    pub fn remove(&mut self, key: &str) -> AppResult<bool> {
        let existed = self.values.remove(key).is_some();
        if existed {
            self.flush()?;
        }
        Ok(existed)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn flush(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Knowledge(format!("Failed to create cache directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json).map_err(|e| {
            AppError::Knowledge(format!("Failed to write cache to {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Flushed cache {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let store = KvStore::for_workspace(temp.path()).unwrap();
        assert!(!store.contains("anything"));
        assert_eq!(store.get::<String>("anything").unwrap(), None);
    }

    #[test]
    fn test_set_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        store.set("greeting", &vec!["namaste".to_string()]).unwrap();

        let reopened = KvStore::for_workspace(temp.path()).unwrap();
        let value: Vec<String> = reopened.get("greeting").unwrap().unwrap();
        assert_eq!(value, vec!["namaste".to_string()]);
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = KvStore::for_workspace(temp.path()).unwrap();
        store.set("k", &1u32).unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = get_store_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(KvStore::open(&path).is_err());
    }

    #[test]
    fn test_open_or_empty_replaces_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let path = get_store_path(temp.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let mut store = KvStore::open_or_empty(&path);
        assert!(!store.contains("k"));

        store.set("k", &1u32).unwrap();
        let reopened = KvStore::open(&path).unwrap();
        assert_eq!(reopened.get::<u32>("k").unwrap(), Some(1));
    }
}
