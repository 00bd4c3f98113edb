//! File-based storage implementation for native platforms.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each key as a JSON file in a specified directory. Keys are used
/// as file names unchanged, so they're limited to ASCII letters, digits,
/// `-` and `_`.
pub struct FileStorage {
    /// Base directory for stored values.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/tabdeck/storage/`
    /// On Windows: `%LOCALAPPDATA%\tabdeck\storage\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("tabdeck").join("storage"))
    }

    /// Get the file path for a key.
    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_json_file(path: &Path) -> bool {
    path.extension().map(|e| e == "json").unwrap_or(false)
}

fn read_value(path: &Path) -> StorageResult<Value> {
    let json = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&json).map_err(|e| {
        StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Value>>> {
        let path = self.key_path(key);

        Box::pin(async move {
            let path = path?;
            if !path.exists() {
                return Ok(None);
            }
            read_value(&path).map(Some)
        })
    }

    fn set(&self, key: &str, value: Value) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);

        Box::pin(async move {
            let path = path?;
            let json = serde_json::to_string_pretty(&value)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.key_path(key);

        Box::pin(async move {
            let path = path?;
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    fn clear(&self) -> BoxFuture<'_, StorageResult<()>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(());
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            for entry in entries.flatten() {
                let path = entry.path();
                if is_json_file(&path) {
                    fs::remove_file(&path).map_err(|e| {
                        StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                    })?;
                }
            }
            Ok(())
        })
    }

    fn get_all(&self) -> BoxFuture<'_, StorageResult<HashMap<String, Value>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            let mut values = HashMap::new();
            if !base.exists() {
                return Ok(values);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            for entry in entries.flatten() {
                let path = entry.path();
                if !is_json_file(&path) {
                    continue;
                }
                match path.file_stem().and_then(|s| s.to_str()) {
                    Some(key) if is_valid_key(key) => {
                        values.insert(key.to_string(), read_value(&path)?);
                    }
                    _ => log::debug!("Skipping {}", path.display()),
                }
            }
            Ok(values)
        })
    }
}
