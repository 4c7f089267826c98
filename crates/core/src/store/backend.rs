//! Key/value persistence backends for the record store
//!
//! The store keeps all records in one serialized blob under one key, so a
//! backend only has to load and replace whole strings.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use log::debug;

use crate::errors::{OptimizerError, Result};

pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was ever written
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Create the backend, creating the data directory if needed
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json.tmp"))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Write to a temp file and rename it over the target
    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = self.temp_path_for(key);
        fs::write(&temp_path, blob)?;
        fs::rename(&temp_path, &path)?;
        debug!("persisted {} bytes to {}", blob.len(), path.display());
        Ok(())
    }
}

/// Process-local backend; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with one blob
    pub fn with_blob(key: &str, blob: impl Into<String>) -> Self {
        let backend = Self::default();
        if let Ok(mut entries) = backend.entries.lock() {
            entries.insert(key.to_string(), blob.into());
        }
        backend
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| OptimizerError::Other("memory backend lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| OptimizerError::Other("memory backend lock poisoned".into()))?;
        entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
