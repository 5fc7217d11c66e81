//! Calculation history ledger.
//!
//! Newest-first sequence of [`FeeBreakdown`] entries kept as one JSON array
//! under a single store key. The `try_*` methods report storage failures;
//! the plain methods log them and fall back to an empty history or a no-op,
//! so a broken store never blocks a calculation.

use tracing::{debug, error};

use crate::models::FeeBreakdown;
use crate::store::{KeyValueStore, StoreResult, HISTORY_KEY};

/// Append-only history of computed fee breakdowns.
pub struct HistoryLedger<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> HistoryLedger<S> {
    /// Create a ledger over `store` using the default history key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    /// Create a ledger over `store` using a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store key holding the history.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Insert `result` at the front of the history.
    ///
    /// No deduplication and no size cap. Failures are logged and dropped.
    pub fn append(&self, result: FeeBreakdown) {
        if let Err(e) = self.try_append(result) {
            error!(key = %self.key, error = %e, "failed to save calculation to history");
        }
    }

    /// Full history, newest first; empty when nothing is stored or the
    /// stored data cannot be read.
    pub fn list(&self) -> Vec<FeeBreakdown> {
        match self.try_list() {
            Ok(history) => history,
            Err(e) => {
                error!(key = %self.key, error = %e, "failed to read calculation history");
                Vec::new()
            }
        }
    }

    /// Remove the whole history.
    pub fn clear(&self) {
        if let Err(e) = self.try_clear() {
            error!(key = %self.key, error = %e, "failed to clear calculation history");
        }
    }

    /// Number of entries in the history.
    pub fn len(&self) -> usize {
        self.list().len()
    }

    /// Whether the history is empty (or unreadable).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `result` at the front of the history, reporting write failures.
    ///
    /// The current history is read leniently: unreadable data is replaced by
    /// a history holding only `result`.
    pub fn try_append(&self, result: FeeBreakdown) -> StoreResult<()> {
        let mut history = self.list();
        history.insert(0, result);
        self.store.put_json(&self.key, &history)?;
        debug!(key = %self.key, entries = history.len(), "saved calculation to history");
        Ok(())
    }

    /// Full history, reporting read and decode failures.
    pub fn try_list(&self) -> StoreResult<Vec<FeeBreakdown>> {
        Ok(self
            .store
            .get_json::<Vec<FeeBreakdown>>(&self.key)?
            .unwrap_or_default())
    }

    /// Remove the whole history, reporting failures.
    pub fn try_clear(&self) -> StoreResult<()> {
        let removed = self.store.delete(&self.key)?;
        debug!(key = %self.key, removed, "cleared calculation history");
        Ok(())
    }
}
