//! Persistence backends for the store.
//!
//! A backend holds one serialized document, like a single key in a local
//! key-value store. The store decides what goes in it.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;

/// Where the store keeps its serialized state.
pub trait Storage: Send + Sync {
    /// Read the stored document, or `None` if nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored document.
    fn write(&self, contents: &str) -> Result<(), StoreError>;

    /// Copy the stored document aside before it gets overwritten.
    ///
    /// Returns where the copy went, or `None` if the backend keeps no copies.
    fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(None)
    }
}

/// Keeps the document in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<path>.bak`, next to the data file.
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        std::fs::write(&self.path, contents).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), bytes = contents.len(), "state saved");
        Ok(())
    }

    fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        let target = self.backup_path();
        std::fs::copy(&self.path, &target).map_err(|e| self.io_error(e))?;
        Ok(Some(target))
    }
}

/// Keeps the document in memory. Used by tests and throwaway stores.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document, as if it had been saved earlier.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(contents.to_string());
        Ok(())
    }
}
