//! Key-value client storage with an in-memory fallback.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store and favorites persist small string values under fixed
//! keys. In the browser those land in `localStorage`; on the server, in tests,
//! or when the browser refuses storage access, values live in memory for the
//! lifetime of the process.
//!
//! ERROR HANDLING
//! ==============
//! Every operation reports `StorageError` instead of panicking. Callers treat
//! persistence as best-effort and log failures as warnings.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Storage key for the persisted bearer token.
pub const TOKEN_KEY: &str = "token_de_acesso";
/// Storage key for the persisted user profile (JSON).
pub const USER_KEY: &str = "user";
/// Storage key for the favorited product codes (JSON array).
pub const FAVORITES_KEY: &str = "favoritos";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed for `{key}`")]
    Read { key: String },
    #[error("storage write failed for `{key}`")]
    Write { key: String },
    #[error("storage remove failed for `{key}`")]
    Remove { key: String },
}

/// String-only key-value storage.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backend rejects the write (quota, private mode).
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` when the backend cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Shared handle to whichever storage backend was selected at startup.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

/// Process-lifetime storage backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh memory store in a `SharedStorage` handle.
    #[must_use]
    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StorageError::Read { key: key.to_owned() })?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StorageError::Write { key: key.to_owned() })?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StorageError::Remove { key: key.to_owned() })?;
        values.remove(key);
        Ok(())
    }
}

/// Browser `localStorage`, looked up on every call so the handle stays `Send + Sync`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    /// Whether the browser exposes `localStorage` at all.
    #[must_use]
    pub fn is_available() -> bool {
        Self::storage().is_ok()
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Read { key: key.to_owned() })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write { key: key.to_owned() })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Remove { key: key.to_owned() })
    }
}

/// Pick the storage backend for this process.
///
/// `localStorage` when the browser grants it, memory otherwise.
#[must_use]
pub fn select_storage() -> SharedStorage {
    #[cfg(feature = "hydrate")]
    {
        if BrowserStorage::is_available() {
            return Arc::new(BrowserStorage);
        }
        leptos::logging::warn!("localStorage unavailable; session and favorites are memory-only");
    }
    MemoryStorage::shared()
}
