//! Order detail types.

use crate::ids::{BookId, OrderDetailId, OrderId};
use crate::money::Money;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// The line detail of an order.
///
/// `unit_price` is a snapshot taken at purchase time; later catalog
/// price edits never change it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetail {
    /// Unique detail identifier.
    pub id: OrderDetailId,
    /// Owning order.
    pub order_id: OrderId,
    /// The purchased book.
    pub book_id: BookId,
    /// Units purchased, at least 1.
    pub quantity: i64,
    /// Unit price at the moment of purchase.
    pub unit_price: Money,
}

impl OrderDetail {
    /// Total price for this detail, `None` on overflow.
    pub fn total(&self) -> Option<Money> {
        self.unit_price.try_mul(self.quantity)
    }
}

impl Record for OrderDetail {
    const TABLE: &'static str = "order_details";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_total() {
        let detail = OrderDetail {
            id: OrderDetailId::new("d1"),
            order_id: OrderId::new("o1"),
            book_id: BookId::new("b1"),
            quantity: 3,
            unit_price: Money::new(50000, Currency::Vnd),
        };
        assert_eq!(detail.total().unwrap().amount_minor, 150000);
    }
}
