//! The `Record` trait connecting domain types to store tables.

use serde::{de::DeserializeOwned, Serialize};

/// A row type bound to a named table.
///
/// Records are stored as serde documents; the key is the row's primary
/// key within its table.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The table this record lives in.
    const TABLE: &'static str;

    /// The primary key of this row.
    fn key(&self) -> String;
}
