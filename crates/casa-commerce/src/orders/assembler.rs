//! Order assembly: one Order plus its OrderDetail, atomically.

use casa_db::Transaction;
use serde::{Deserialize, Serialize};

use crate::ids::{BookId, OrderDetailId, UserId};
use crate::money::Money;
use crate::orders::{Order, OrderDetail, Recipient};
use crate::CommerceError;

/// An order together with its detail, as created by checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub detail: OrderDetail,
}

/// Persist one pending Order with exactly one OrderDetail.
///
/// `unit_price` is the caller's snapshot of the book price. No business
/// rules here; this exists so the order and its detail always commit (or
/// fail) together with the rest of the checkout transaction.
pub fn create_order(
    tx: &mut Transaction,
    user_id: &UserId,
    recipient: &Recipient,
    book_id: &BookId,
    quantity: i64,
    unit_price: Money,
) -> Result<PlacedOrder, CommerceError> {
    if quantity < 1 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }

    let order = Order::new(user_id.clone(), recipient.clone());
    let detail = OrderDetail {
        id: OrderDetailId::generate(),
        order_id: order.id.clone(),
        book_id: book_id.clone(),
        quantity,
        unit_price,
    };
    tx.insert(&order)?;
    tx.insert(&detail)?;

    Ok(PlacedOrder { order, detail })
}
