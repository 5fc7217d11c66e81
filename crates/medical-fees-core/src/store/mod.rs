//! Persistent key-value storage.
//!
//! Replaces the browser's local storage with an explicit store interface.
//! Backends:
//! - [`Database`]: SQLite, file-backed or in-memory
//! - [`MemoryStore`]: process-local map with an optional byte quota

mod memory;
mod schema;
mod sqlite;

pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Key under which the calculation history is kept.
pub const HISTORY_KEY: &str = "medicalFeesHistory";

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// String key-value store.
///
/// Reads and writes are independent; a read-modify-write sequence is not
/// atomic across handles.
pub trait KeyValueStore {
    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns whether anything was removed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Get and deserialize a JSON value.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>>
    where
        Self: Sized,
    {
        self.get(key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(Into::into)
    }

    /// Serialize and store a JSON value.
    fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw)
    }
}
