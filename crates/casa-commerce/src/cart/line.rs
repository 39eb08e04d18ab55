//! Cart line types.

use crate::ids::{BookId, CartLineId, UserId};
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// Lifecycle of a cart line.
///
/// A line is `Pending` from add-to-cart until checkout marks it
/// `Completed`; completed lines are deleted once their order is durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    #[default]
    Pending,
    Completed,
}

impl CartStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartStatus::Pending => "pending",
            CartStatus::Completed => "completed",
        }
    }
}

/// One book/quantity entry pending purchase for a user.
///
/// Invariant: at most one pending line per (user, book) pair; adding the
/// same book again increments the existing line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: CartLineId,
    /// Owning user.
    pub user_id: UserId,
    /// The book in this line.
    pub book_id: BookId,
    /// Lifecycle status.
    pub status: CartStatus,
    /// Units to purchase, at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// A fresh pending line with quantity 1.
    pub fn new(user_id: UserId, book_id: BookId) -> Self {
        Self {
            id: CartLineId::generate(),
            user_id,
            book_id,
            status: CartStatus::Pending,
            quantity: 1,
        }
    }
}

impl Record for CartLine {
    const TABLE: &'static str = "cart";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}
