//! Durable key-value persistence for the cart snapshot.
//!
//! The storefront historically kept the cart in browser localStorage under
//! the key `@RocketShoes:cart`, with the value being the JSON array of line
//! items. [`JsonFileStorage`] reproduces that contract on disk for a native
//! client: one JSON object file mapping keys to string values. Writes are
//! synchronous and rare (one per mutation), so no async I/O is warranted.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Storage key for the serialized cart snapshot.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur when reading or writing persistent storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage file exists but is not a valid key-value map.
    #[error("malformed storage file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable string storage surviving process restarts.
///
/// `get` returns `None` for keys never written. Both methods take `&self`;
/// implementations handle their own interior mutability.
pub trait CartStorage {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JsonFileStorage
// =============================================================================

/// File-backed key-value storage.
///
/// The whole map lives in a single JSON object file and is re-read on every
/// access, so concurrent stores pointed at the same file observe each
/// other's writes.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage backed by the given file path.
    ///
    /// The file is created lazily on the first `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl CartStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // A malformed file is replaced rather than appended to.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&map)?)?;
        Ok(())
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage for tests and ephemeral carts.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
