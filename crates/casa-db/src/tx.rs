//! Row-level operations within a transaction.

use crate::store::{Table, Tables};
use crate::{Record, StoreError};

/// A handle to the tables inside one transaction.
///
/// All reads observe earlier writes of the same transaction. Nothing is
/// committed until the transaction closure returns `Ok`.
pub struct Transaction<'a> {
    tables: &'a mut Tables,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(tables: &'a mut Tables) -> Self {
        Self { tables }
    }

    fn table<R: Record>(&self) -> Option<&Table> {
        self.tables.get(R::TABLE)
    }

    fn table_mut<R: Record>(&mut self) -> &mut Table {
        self.tables.entry(R::TABLE.to_string()).or_default()
    }

    /// Insert a new row. Fails if the key is already taken.
    pub fn insert<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let key = record.key();
        let row = to_row(record)?;
        let table = self.table_mut::<R>();
        if table.contains_key(&key) {
            return Err(StoreError::DuplicateKey {
                table: R::TABLE,
                key,
            });
        }
        table.insert(key, row);
        Ok(())
    }

    /// Insert or replace a row.
    pub fn upsert<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let key = record.key();
        let row = to_row(record)?;
        self.table_mut::<R>().insert(key, row);
        Ok(())
    }

    /// Replace an existing row. Fails if the key does not exist.
    pub fn update<R: Record>(&mut self, record: &R) -> Result<(), StoreError> {
        let key = record.key();
        let row = to_row(record)?;
        let table = self.table_mut::<R>();
        if !table.contains_key(&key) {
            return Err(StoreError::RowNotFound {
                table: R::TABLE,
                key,
            });
        }
        table.insert(key, row);
        Ok(())
    }

    /// Delete a row by key. Returns whether a row was removed.
    pub fn delete<R: Record>(&mut self, key: &str) -> Result<bool, StoreError> {
        Ok(self.table_mut::<R>().remove(key).is_some())
    }

    /// Fetch a row by key.
    pub fn get<R: Record>(&self, key: &str) -> Result<Option<R>, StoreError> {
        match self.table::<R>().and_then(|t| t.get(key)) {
            Some(row) => Ok(Some(from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Fetch every row of the table.
    pub fn all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        match self.table::<R>() {
            Some(table) => table.values().map(from_row).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch every row matching a predicate.
    pub fn find<R: Record>(&self, pred: impl Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let mut rows = self.all::<R>()?;
        rows.retain(|r| pred(r));
        Ok(rows)
    }

    /// Fetch the first row matching a predicate.
    pub fn find_one<R: Record>(&self, pred: impl Fn(&R) -> bool) -> Result<Option<R>, StoreError> {
        Ok(self.find(pred)?.into_iter().next())
    }

    /// Count the rows of a table.
    pub fn count<R: Record>(&self) -> usize {
        self.table::<R>().map(|t| t.len()).unwrap_or(0)
    }
}

fn to_row<R: Record>(record: &R) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_row<R: Record>(row: &serde_json::Value) -> Result<R, StoreError> {
    serde_json::from_value(row.clone()).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::{Record, Store, StoreError};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        tag: String,
    }

    impl Record for Item {
        const TABLE: &'static str = "item";
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    fn item(id: &str, tag: &str) -> Item {
        Item {
            id: id.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn test_update_missing_row_fails() {
        let store = Store::new();
        let err = store
            .transaction::<_, StoreError, _>(|tx| tx.update(&item("nope", "x")))
            .unwrap_err();
        assert!(matches!(err, StoreError::RowNotFound { .. }));
    }

    #[test]
    fn test_upsert_creates_then_replaces() {
        let store = Store::new();
        store
            .transaction::<_, StoreError, _>(|tx| {
                tx.upsert(&item("a", "first"))?;
                tx.upsert(&item("a", "second"))
            })
            .unwrap();

        let a: Item = store.get("a").unwrap().unwrap();
        assert_eq!(a.tag, "second");
    }

    #[test]
    fn test_reads_see_own_writes() {
        let store = Store::new();
        store
            .transaction::<_, StoreError, _>(|tx| {
                tx.insert(&item("a", "x"))?;
                assert!(tx.get::<Item>("a")?.is_some());
                assert_eq!(tx.count::<Item>(), 1);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_find_filters_rows() {
        let store = Store::new();
        store
            .transaction::<_, StoreError, _>(|tx| {
                tx.insert(&item("a", "red"))?;
                tx.insert(&item("b", "blue"))?;
                tx.insert(&item("c", "red"))
            })
            .unwrap();

        let reds = store
            .read::<_, StoreError, _>(|tx| tx.find::<Item>(|i| i.tag == "red"))
            .unwrap();
        assert_eq!(reds.len(), 2);

        let blue = store
            .read::<_, StoreError, _>(|tx| tx.find_one::<Item>(|i| i.tag == "blue"))
            .unwrap();
        assert_eq!(blue.unwrap().id, "b");
    }

    #[test]
    fn test_delete_reports_removal() {
        let store = Store::new();
        store.insert(&item("a", "x")).unwrap();

        let removed = store
            .transaction::<_, StoreError, _>(|tx| tx.delete::<Item>("a"))
            .unwrap();
        assert!(removed);

        let removed_again = store
            .transaction::<_, StoreError, _>(|tx| tx.delete::<Item>("a"))
            .unwrap();
        assert!(!removed_again);
    }
}
