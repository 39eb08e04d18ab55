//! Store errors.

use thiserror::Error;

/// Errors produced by the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No row with the given key exists in the table.
    #[error("row not found in {table}: {key}")]
    RowNotFound { table: &'static str, key: String },

    /// A row with the given key already exists in the table.
    #[error("duplicate row in {table}: {key}")]
    DuplicateKey { table: &'static str, key: String },

    /// A row could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// A snapshot file could not be read or written.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}
