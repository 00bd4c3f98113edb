//! Browser `localStorage` implementation for WebAssembly.
//!
//! Values are stored as JSON strings. The browser API is synchronous, so each
//! future resolves on first poll.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use serde_json::Value;
use std::collections::HashMap;
use wasm_bindgen::JsValue;

/// `localStorage`-backed storage for WebAssembly.
///
/// Note: This is intentionally not Send/Sync since WASM is single-threaded
/// and `web_sys::Storage` handles are not thread-safe.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

fn js_error(context: &str, e: JsValue) -> StorageError {
    StorageError::Other(format!("{}: {:?}", context, e))
}

impl LocalStorage {
    /// Open the window's `localStorage`.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;

        let inner = window
            .local_storage()
            .map_err(|e| js_error("localStorage error", e))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;

        Ok(Self { inner })
    }

    fn read(&self, key: &str) -> StorageResult<Option<Value>> {
        let raw = self
            .inner
            .get_item(key)
            .map_err(|e| js_error("Failed to read item", e))?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let len = self
            .inner
            .length()
            .map_err(|e| js_error("Failed to read length", e))?;

        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = self.inner.key(i).map_err(|e| js_error("Failed to read key", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Value>>> {
        let result = self.read(key);
        Box::pin(async move { result })
    }

    fn set(&self, key: &str, value: Value) -> BoxFuture<'_, StorageResult<()>> {
        let result = serde_json::to_string(&value)
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .and_then(|json| {
                self.inner
                    .set_item(key, &json)
                    .map_err(|e| js_error("Failed to write item", e))
            });
        Box::pin(async move { result })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let result = self
            .inner
            .remove_item(key)
            .map_err(|e| js_error("Failed to remove item", e));
        Box::pin(async move { result })
    }

    fn clear(&self) -> BoxFuture<'_, StorageResult<()>> {
        let result = self.inner.clear().map_err(|e| js_error("Failed to clear", e));
        Box::pin(async move { result })
    }

    fn get_all(&self) -> BoxFuture<'_, StorageResult<HashMap<String, Value>>> {
        let result = self.keys().and_then(|keys| {
            let mut values = HashMap::new();
            for key in keys {
                if let Some(value) = self.read(&key)? {
                    values.insert(key, value);
                }
            }
            Ok(values)
        });
        Box::pin(async move { result })
    }
}
