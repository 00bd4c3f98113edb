//! Key-value storage abstraction for persistence.
//!
//! Every value is a JSON document. The dashboard keeps its widgets under
//! a single key and its preferences under a handful of others, so the
//! interface mirrors a browser's `localStorage` rather than a document store.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for key-value storage backends.
///
/// A missing key reads as `Ok(None)`; removing a missing key is not an error.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Value>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove the value stored under `key`.
    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove every key.
    fn clear(&self) -> BoxFuture<'_, StorageResult<()>>;

    /// Read every stored key and value.
    fn get_all(&self) -> BoxFuture<'_, StorageResult<HashMap<String, Value>>>;
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<Value>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove the value stored under `key`.
    fn remove(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Remove every key.
    fn clear(&self) -> BoxFuture<'_, StorageResult<()>>;

    /// Read every stored key and value.
    fn get_all(&self) -> BoxFuture<'_, StorageResult<HashMap<String, Value>>>;
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<FileStorage>> {
    Ok(Arc::new(FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<LocalStorage>> {
    Ok(Arc::new(LocalStorage::new()?))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;
