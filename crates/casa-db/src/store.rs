//! The store handle and transaction execution.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::tx::Transaction;
use crate::{Record, StoreError};

pub(crate) type Table = BTreeMap<String, serde_json::Value>;
pub(crate) type Tables = HashMap<String, Table>;

/// A shared handle to the store.
///
/// Cloning is cheap; all clones point at the same tables. The store is
/// the sole synchronization point between concurrent requests: every
/// transaction runs under one writer lock, and its writes become visible
/// only when the closure returns `Ok`.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Tables>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store from a JSON snapshot file.
    ///
    /// A missing file yields an empty store, so first runs need no setup.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Snapshot(e.to_string()))?;
        let tables: Tables =
            serde_json::from_str(&content).map_err(|e| StoreError::Snapshot(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(tables)),
        })
    }

    /// Write the current committed state to a JSON snapshot file.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let guard = self.inner.lock().map_err(|_| StoreError::LockPoisoned)?;
        let content = serde_json::to_string_pretty(&*guard)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    /// Run a closure as one atomic transaction.
    ///
    /// The closure works against a private copy of the tables. If it
    /// returns `Ok`, the copy replaces the committed state; if it returns
    /// `Err`, every buffered write is discarded. Transactions are
    /// serialized, which is what makes a check-then-decrement sequence
    /// safe against concurrent checkouts.
    pub fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&mut Transaction) -> Result<T, E>,
    {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| E::from(StoreError::LockPoisoned))?;
        let mut work = guard.clone();
        let mut tx = Transaction::new(&mut work);
        let out = f(&mut tx)?;
        *guard = work;
        Ok(out)
    }

    /// Run a closure against the committed state, discarding any writes.
    pub fn read<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(&Transaction) -> Result<T, E>,
    {
        let guard = self
            .inner
            .lock()
            .map_err(|_| E::from(StoreError::LockPoisoned))?;
        let mut snapshot = guard.clone();
        let tx = Transaction::new(&mut snapshot);
        f(&tx)
    }

    /// Fetch a single row by key.
    pub fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        self.read(|tx| tx.get::<R>(key))
    }

    /// Fetch every row of a table.
    pub fn all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.read(|tx| tx.all::<R>())
    }

    /// Insert a single row in its own transaction.
    pub fn insert<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.transaction(|tx| tx.insert(record))
    }
}
