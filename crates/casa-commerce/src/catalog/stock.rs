//! Stock tracking for catalog items.

use serde::{Deserialize, Serialize};

/// Stock state of a book.
///
/// Tri-state by design: tracked-available, tracked-exhausted, or
/// untracked. An untracked book has no quantity ceiling and always
/// passes availability checks; this covers made-to-order and service
/// items that are intentionally exempt from stock control. Serialized
/// as a nullable integer, `null` meaning untracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Stock {
    /// No quantity ceiling.
    Untracked,
    /// A counted quantity on hand, never negative.
    Tracked(i64),
}

impl Stock {
    /// Tracked stock with the given quantity, clamped at zero.
    pub fn tracked(quantity: i64) -> Self {
        Stock::Tracked(quantity.max(0))
    }

    /// Untracked stock.
    pub fn untracked() -> Self {
        Stock::Untracked
    }

    /// The counted quantity, or `None` when untracked.
    pub fn available(&self) -> Option<i64> {
        match self {
            Stock::Untracked => None,
            Stock::Tracked(n) => Some(*n),
        }
    }

    /// Check if a specific quantity can be fulfilled.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        match self {
            Stock::Untracked => true,
            Stock::Tracked(n) => *n >= quantity,
        }
    }

    /// Check if the item is tracked and exhausted.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Stock::Tracked(0))
    }

    /// The stock after removing `quantity` units.
    ///
    /// `None` if the removal would drive a tracked count below zero.
    /// Untracked stock is unchanged.
    pub fn decremented(&self, quantity: i64) -> Option<Stock> {
        match self {
            Stock::Untracked => Some(Stock::Untracked),
            Stock::Tracked(n) if *n >= quantity => Some(Stock::Tracked(n - quantity)),
            Stock::Tracked(_) => None,
        }
    }
}

impl From<Option<i64>> for Stock {
    fn from(value: Option<i64>) -> Self {
        match value {
            None => Stock::Untracked,
            Some(n) => Stock::tracked(n),
        }
    }
}

impl From<Stock> for Option<i64> {
    fn from(stock: Stock) -> Self {
        stock.available()
    }
}
