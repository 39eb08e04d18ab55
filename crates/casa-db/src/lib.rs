//! Transactional document-table store for Casabook.
//!
//! Provides row-level `find/create/update/delete` over named tables with
//! all-or-nothing transactions. The store serializes transactions, so a
//! read-check-write sequence inside one transaction can never interleave
//! with another writer.
//!
//! # Example
//!
//! ```rust,ignore
//! use casa_db::{Record, Store};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Book {
//!     id: String,
//!     name: String,
//!     price: i64,
//! }
//!
//! impl Record for Book {
//!     const TABLE: &'static str = "book";
//!     fn key(&self) -> String {
//!         self.id.clone()
//!     }
//! }
//!
//! let store = Store::new();
//! store.transaction::<_, casa_db::StoreError, _>(|tx| {
//!     tx.insert(&Book {
//!         id: "b1".into(),
//!         name: "Rust Book".into(),
//!         price: 4999,
//!     })
//! })?;
//! ```

mod error;
mod record;
mod store;
mod tx;

pub use error::StoreError;
pub use record::Record;
pub use store::Store;
pub use tx::Transaction;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Record, Store, StoreError, Transaction};
}
