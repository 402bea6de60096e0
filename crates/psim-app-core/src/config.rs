// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for psim tools.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Where serialised settings live. Keys are short logical names such as
/// `sandbox_prefs`; values are opaque bytes.
pub trait ConfigStore {
    /// Bytes stored under `key`, or `ConfigError::NotFound`.
    fn read_blob(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces whatever is stored under `key`.
    fn write_blob(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Failures while reading or writing settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing stored under the key.
    #[error("config key not found")]
    NotFound,
    /// The backing store failed.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored blob is not valid JSON for the requested type.
    #[error("config decode error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Store-specific rejection (bad key, unresolvable directory).
    #[error("config error: {0}")]
    Other(String),
}

/// Serialises config values as JSON and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the inner store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value under `key`. `Ok(None)` if missing or
    /// empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.read_blob(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Like [`ConfigService::load`], falling back to `T::default()`.
    pub fn load_or_default<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Writes `value` as pretty JSON under `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.write_blob(key, &data)
    }

    /// Load (or default), apply `f`, save, and return the updated value.
    pub fn update<T>(&self, key: &str, f: impl FnOnce(&mut T)) -> Result<T, ConfigError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let mut value = self.load_or_default(key)?;
        f(&mut value);
        self.save(key, &value)?;
        Ok(value)
    }
}

/// Process-local store; nothing touches disk. Useful for tests and for
/// running without a writable config directory.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read_blob(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn write_blob(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
