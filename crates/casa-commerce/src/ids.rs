//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a BookId where a LabelId is expected. Generated values
//! are UUID v4 strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random ID.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define all ID types
define_id!(BookId);
define_id!(LabelId);
define_id!(MenuItemId);
define_id!(CartLineId);
define_id!(OrderId);
define_id!(OrderDetailId);
define_id!(UserId);
define_id!(ContactId);
define_id!(PointPurchaseId);
define_id!(LevelUserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = BookId::new("book-123");
        assert_eq!(id.as_str(), "book-123");
    }

    #[test]
    fn test_id_generation_is_unique() {
        let id1 = BookId::generate();
        let id2 = BookId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_id_is_uuid() {
        let id = OrderId::generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_id_display() {
        let id = UserId::new("user-789");
        assert_eq!(format!("{}", id), "user-789");
    }

    #[test]
    fn test_id_from_string() {
        let id: LabelId = "label-456".into();
        assert_eq!(id.as_str(), "label-456");
    }
}
