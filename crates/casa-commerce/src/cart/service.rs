//! Cart operations: list, add, update quantity, remove.

use casa_db::{Store, Transaction};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartStatus};
use crate::catalog::Book;
use crate::ids::{BookId, CartLineId, UserId};
use crate::users::UserAccount;
use crate::CommerceError;

/// A cart line joined with its book, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    pub line: CartLine,
    pub book: Book,
}

/// Cart service for a shared store.
pub struct CartService {
    store: Store,
}

impl CartService {
    /// Create a cart service over the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The user's cart, each line joined with its book.
    pub fn list(&self, user_id: &UserId) -> Result<Vec<CartEntry>, CommerceError> {
        self.store.read::<_, CommerceError, _>(|tx| {
            resolve_user(tx, user_id)?;
            let lines = tx.find::<CartLine>(|line| line.user_id == *user_id)?;
            let mut entries = Vec::with_capacity(lines.len());
            for line in lines {
                let book: Book = tx
                    .get(line.book_id.as_str())?
                    .ok_or_else(|| CommerceError::BookNotFound(line.book_id.to_string()))?;
                entries.push(CartEntry { line, book });
            }
            Ok(entries)
        })
    }

    /// Add one unit of a book to the user's cart.
    ///
    /// If a pending line for this (user, book) pair already exists, its
    /// quantity is incremented instead of creating a second line. The
    /// whole increment-or-create runs in one transaction, so two
    /// concurrent adds of the same book cannot produce two lines.
    pub fn add(&self, user_id: &UserId, book_id: &BookId) -> Result<CartLine, CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            resolve_user(tx, user_id)?;
            if tx.get::<Book>(book_id.as_str())?.is_none() {
                return Err(CommerceError::BookNotFound(book_id.to_string()));
            }

            let existing = tx.find_one::<CartLine>(|line| {
                line.user_id == *user_id
                    && line.book_id == *book_id
                    && line.status == CartStatus::Pending
            })?;

            match existing {
                Some(mut line) => {
                    line.quantity += 1;
                    tx.update(&line)?;
                    Ok(line)
                }
                None => {
                    let line = CartLine::new(user_id.clone(), book_id.clone());
                    tx.insert(&line)?;
                    Ok(line)
                }
            }
        })
    }

    /// Set a line's quantity. A quantity below 1 removes the line.
    ///
    /// Returns the updated line, or `None` when the line was removed.
    pub fn update_quantity(
        &self,
        user_id: &UserId,
        line_id: &CartLineId,
        quantity: i64,
    ) -> Result<Option<CartLine>, CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            resolve_user(tx, user_id)?;
            let mut line = owned_line(tx, user_id, line_id)?;

            if quantity < 1 {
                tx.delete::<CartLine>(line.id.as_str())?;
                return Ok(None);
            }

            line.quantity = quantity;
            tx.update(&line)?;
            Ok(Some(line))
        })
    }

    /// Remove a line from the user's cart.
    pub fn remove(&self, user_id: &UserId, line_id: &CartLineId) -> Result<(), CommerceError> {
        self.store.transaction::<_, CommerceError, _>(|tx| {
            resolve_user(tx, user_id)?;
            let line = owned_line(tx, user_id, line_id)?;
            tx.delete::<CartLine>(line.id.as_str())?;
            Ok(())
        })
    }
}

fn resolve_user(tx: &Transaction, user_id: &UserId) -> Result<UserAccount, CommerceError> {
    tx.get(user_id.as_str())?
        .ok_or_else(|| CommerceError::UserNotFound(user_id.to_string()))
}

fn owned_line(
    tx: &Transaction,
    user_id: &UserId,
    line_id: &CartLineId,
) -> Result<CartLine, CommerceError> {
    let line: Option<CartLine> = tx.get(line_id.as_str())?;
    match line {
        Some(line) if line.user_id == *user_id => Ok(line),
        _ => Err(CommerceError::CartItemNotFound),
    }
}
