//! Book types.

use crate::catalog::Stock;
use crate::ids::{BookId, LabelId};
use crate::money::Money;
use crate::CommerceError;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// Catalog shelf a book is promoted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookKind {
    /// Newly added title.
    #[default]
    New,
    /// Discounted title.
    Sale,
}

impl BookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookKind::New => "new",
            BookKind::Sale => "sale",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "new" => Some(BookKind::New),
            "sale" => Some(BookKind::Sale),
            _ => None,
        }
    }
}

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique book identifier.
    pub id: BookId,
    /// Title.
    pub name: String,
    /// Current catalog price. Orders snapshot this at purchase time.
    pub price: Money,
    /// Cover image URL.
    pub image_url: String,
    /// Long description.
    pub description: String,
    /// Shelf classification.
    pub kind: BookKind,
    /// The label this book is filed under.
    pub label_id: LabelId,
    /// Stock on hand; untracked books have no ceiling.
    pub stock: Stock,
}

impl Record for Book {
    const TABLE: &'static str = "book";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Fields supplied when creating or updating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDraft {
    pub name: String,
    pub price: Money,
    pub description: String,
    pub kind: BookKind,
    pub label_id: LabelId,
    pub stock: Stock,
}

impl BookDraft {
    /// Reject drafts with empty required fields.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.name.trim().is_empty() {
            return Err(CommerceError::MissingField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(CommerceError::MissingField("description"));
        }
        if self.price.amount_minor < 0 {
            return Err(CommerceError::MissingField("price"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn draft() -> BookDraft {
        BookDraft {
            name: "The Little Prince".to_string(),
            price: Money::new(95000, Currency::Vnd),
            description: "A classic.".to_string(),
            kind: BookKind::New,
            label_id: LabelId::new("label-1"),
            stock: Stock::tracked(10),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut d = draft();
        d.name = "  ".to_string();
        assert!(matches!(
            d.validate(),
            Err(CommerceError::MissingField("name"))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut d = draft();
        d.price = Money::new(-1, Currency::Vnd);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_book_kind_roundtrip() {
        assert_eq!(BookKind::from_str("sale"), Some(BookKind::Sale));
        assert_eq!(BookKind::Sale.as_str(), "sale");
        assert_eq!(BookKind::from_str("unknown"), None);
    }
}
