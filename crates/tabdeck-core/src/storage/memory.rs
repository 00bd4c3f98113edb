//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory storage pre-populated with `values`.
    pub fn with_values(values: HashMap<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Value>>> {
        let key = key.to_string();
        Box::pin(async move {
            let values = self.values.read().map_err(lock_error)?;
            Ok(values.get(&key).cloned())
        })
    }

    fn set(&self, key: &str, value: Value) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut values = self.values.write().map_err(lock_error)?;
            values.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut values = self.values.write().map_err(lock_error)?;
            values.remove(&key);
            Ok(())
        })
    }

    fn clear(&self) -> BoxFuture<'_, StorageResult<()>> {
        Box::pin(async move {
            self.values.write().map_err(lock_error)?.clear();
            Ok(())
        })
    }

    fn get_all(&self) -> BoxFuture<'_, StorageResult<HashMap<String, Value>>> {
        Box::pin(async move {
            let values = self.values.read().map_err(lock_error)?;
            Ok(values.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();

        block_on(storage.set("locale", json!("fr"))).unwrap();
        let value = block_on(storage.get("locale")).unwrap();

        assert_eq!(value, Some(json!("fr")));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(block_on(storage.get("nonexistent")).unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let storage = MemoryStorage::new();

        block_on(storage.set("locked", json!(true))).unwrap();
        block_on(storage.remove("locked")).unwrap();
        assert_eq!(block_on(storage.get("locked")).unwrap(), None);

        // Removing again is a no-op
        block_on(storage.remove("locked")).unwrap();
    }

    #[test]
    fn test_get_all_returns_a_snapshot() {
        let storage = MemoryStorage::new();
        block_on(storage.set("a", json!(1))).unwrap();
        block_on(storage.set("b", json!({ "x": 2 }))).unwrap();

        let mut all = block_on(storage.get_all()).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["b"], json!({ "x": 2 }));

        all.insert("c".to_string(), json!(3));
        assert_eq!(block_on(storage.get("c")).unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        block_on(storage.set("a", json!(1))).unwrap();
        block_on(storage.set("b", json!(2))).unwrap();

        block_on(storage.clear()).unwrap();
        assert!(block_on(storage.get_all()).unwrap().is_empty());
    }
}
