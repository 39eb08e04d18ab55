//! Order types.

use crate::ids::{OrderId, UserId};
use crate::CommerceError;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// Order status.
///
/// Transitions are admin-driven; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order being prepared.
    Processing,
    /// Order delivered.
    Completed,
    /// Order canceled.
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "completed" => Some(OrderStatus::Completed),
            "canceled" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }
}

/// Delivery details captured at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipient {
    /// Recipient name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Optional delivery note.
    pub note: Option<String>,
}

impl Recipient {
    /// Create a recipient without a note.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            note: None,
        }
    }

    /// Attach a delivery note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Reject empty required fields before any mutation happens.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(CommerceError::MissingField("phone"));
        }
        if self.address.trim().is_empty() {
            return Err(CommerceError::MissingField("address"));
        }
        Ok(())
    }
}

/// A durable order, one per purchased line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// The buyer.
    pub user_id: UserId,
    /// Delivery details.
    pub recipient: Recipient,
    /// Current status.
    pub status: OrderStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Create a pending order timestamped now.
    pub fn new(user_id: UserId, recipient: Recipient) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            recipient,
            status: OrderStatus::Pending,
            created_at: current_timestamp(),
        }
    }
}

impl Record for Order {
    const TABLE: &'static str = "order";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new(UserId::new("u1"), Recipient::new("An", "0901", "Da Nang"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.created_at > 0);
    }

    #[test]
    fn test_recipient_validation() {
        assert!(Recipient::new("An", "0901", "Da Nang").validate().is_ok());
        assert!(matches!(
            Recipient::new("", "0901", "Da Nang").validate(),
            Err(CommerceError::MissingField("name"))
        ));
        assert!(matches!(
            Recipient::new("An", " ", "Da Nang").validate(),
            Err(CommerceError::MissingField("phone"))
        ));
        assert!(matches!(
            Recipient::new("An", "0901", "").validate(),
            Err(CommerceError::MissingField("address"))
        ));
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_str("shipped"), None);
    }
}
