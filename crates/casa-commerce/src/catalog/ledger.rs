//! Inventory ledger: availability checks and stock decrements.
//!
//! Both operations run inside the caller's transaction. The store
//! serializes transactions, so a check followed by a decrement in the
//! same transaction cannot race another checkout: two buyers of the last
//! unit will have one of them fail the check.

use crate::catalog::Book;
use crate::ids::BookId;
use crate::CommerceError;
use casa_db::Transaction;

/// Verify the book exists and can fulfill `requested` units.
///
/// Untracked books always pass. Returns the book so callers can reuse
/// the name and the price snapshot without a second read.
pub fn check_availability(
    tx: &Transaction,
    book_id: &BookId,
    requested: i64,
) -> Result<Book, CommerceError> {
    let book: Book = tx
        .get(book_id.as_str())?
        .ok_or_else(|| CommerceError::BookNotFound(book_id.to_string()))?;

    if !book.stock.can_fulfill(requested) {
        return Err(CommerceError::InsufficientStock {
            book: book.name.clone(),
            requested,
            available: book.stock.available().unwrap_or(0),
        });
    }
    Ok(book)
}

/// Reduce the book's tracked stock by `quantity`.
///
/// No-op for untracked books. Never drives stock below zero; a decrement
/// that would is reported as insufficient stock, which aborts the
/// enclosing transaction.
pub fn decrement(
    tx: &mut Transaction,
    book_id: &BookId,
    quantity: i64,
) -> Result<(), CommerceError> {
    let mut book: Book = tx
        .get(book_id.as_str())?
        .ok_or_else(|| CommerceError::BookNotFound(book_id.to_string()))?;

    match book.stock.decremented(quantity) {
        Some(stock) => {
            book.stock = stock;
            tx.update(&book)?;
            Ok(())
        }
        None => Err(CommerceError::InsufficientStock {
            book: book.name.clone(),
            requested: quantity,
            available: book.stock.available().unwrap_or(0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BookKind, Stock};
    use crate::ids::LabelId;
    use crate::money::{Currency, Money};
    use casa_db::Store;

    fn book(id: &str, stock: Stock) -> Book {
        Book {
            id: BookId::new(id),
            name: format!("Book {id}"),
            price: Money::new(50000, Currency::Vnd),
            image_url: "https://cdn.local/books/cover.png".to_string(),
            description: "desc".to_string(),
            kind: BookKind::New,
            label_id: LabelId::new("label-1"),
            stock,
        }
    }

    #[test]
    fn test_check_availability_tracked() {
        let store = Store::new();
        store.insert(&book("b1", Stock::tracked(3))).unwrap();

        store
            .read::<_, CommerceError, _>(|tx| {
                assert!(check_availability(tx, &BookId::new("b1"), 3).is_ok());
                let err = check_availability(tx, &BookId::new("b1"), 4).unwrap_err();
                assert!(matches!(err, CommerceError::InsufficientStock { available: 3, .. }));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_untracked_book_always_available() {
        let store = Store::new();
        store.insert(&book("b1", Stock::untracked())).unwrap();

        store
            .read::<_, CommerceError, _>(|tx| {
                assert!(check_availability(tx, &BookId::new("b1"), 10_000).is_ok());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_unknown_book_is_not_found() {
        let store = Store::new();
        store
            .read::<_, CommerceError, _>(|tx| {
                let err = check_availability(tx, &BookId::new("missing"), 1).unwrap_err();
                assert!(matches!(err, CommerceError::BookNotFound(_)));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_decrement_updates_stock() {
        let store = Store::new();
        store.insert(&book("b1", Stock::tracked(5))).unwrap();

        store
            .transaction::<_, CommerceError, _>(|tx| decrement(tx, &BookId::new("b1"), 2))
            .unwrap();

        let after: Book = store.get("b1").unwrap().unwrap();
        assert_eq!(after.stock, Stock::Tracked(3));
    }

    #[test]
    fn test_decrement_below_zero_fails_and_rolls_back() {
        let store = Store::new();
        store.insert(&book("b1", Stock::tracked(1))).unwrap();

        let result = store
            .transaction::<_, CommerceError, _>(|tx| decrement(tx, &BookId::new("b1"), 2));
        assert!(result.is_err());

        let after: Book = store.get("b1").unwrap().unwrap();
        assert_eq!(after.stock, Stock::Tracked(1));
    }

    #[test]
    fn test_decrement_skipped_for_untracked() {
        let store = Store::new();
        store.insert(&book("b1", Stock::untracked())).unwrap();

        store
            .transaction::<_, CommerceError, _>(|tx| decrement(tx, &BookId::new("b1"), 100))
            .unwrap();

        let after: Book = store.get("b1").unwrap().unwrap();
        assert_eq!(after.stock, Stock::Untracked);
    }
}
