//! Checkout results returned to clients.

use serde::{Deserialize, Serialize};

use crate::loyalty::LoyaltyLevel;
use crate::orders::PlacedOrder;

/// The result of a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// One placed order per purchased line item.
    pub orders: Vec<PlacedOrder>,
    /// The buyer's loyalty level after this purchase.
    pub level: LoyaltyLevel,
}

impl OrderConfirmation {
    /// Total units purchased across all orders.
    pub fn total_quantity(&self) -> i64 {
        self.orders.iter().map(|p| p.detail.quantity).sum()
    }
}
