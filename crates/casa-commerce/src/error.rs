//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// No verified identity, or the identity resolves to no account.
    #[error("sign-in required")]
    Unauthorized,

    /// Authenticated but lacking the required role or ownership.
    #[error("access denied")]
    Forbidden,

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Book not found.
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// Label not found.
    #[error("label not found: {0}")]
    LabelNotFound(String),

    /// Menu item not found.
    #[error("menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// Contact not found.
    #[error("contact not found: {0}")]
    ContactNotFound(String),

    /// No matching cart line for the user.
    #[error("cart item not found")]
    CartItemNotFound,

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Quantity must be at least 1.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Requested quantity exceeds tracked availability.
    #[error("insufficient stock for {book}: requested {requested}, available {available}")]
    InsufficientStock {
        book: String,
        requested: i64,
        available: i64,
    },

    /// A unique field already has this value.
    #[error("duplicate {field}: {value}")]
    Duplicate {
        field: &'static str,
        value: String,
    },

    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Store failure.
    #[error("store error: {0}")]
    Store(#[from] casa_db::StoreError),

    /// Blob store failure.
    #[error("blob store error: {0}")]
    BlobStore(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CommerceError {
    /// The HTTP status code this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            CommerceError::Unauthorized => 401,
            CommerceError::Forbidden => 403,
            CommerceError::UserNotFound(_)
            | CommerceError::BookNotFound(_)
            | CommerceError::LabelNotFound(_)
            | CommerceError::MenuItemNotFound(_)
            | CommerceError::OrderNotFound(_)
            | CommerceError::ContactNotFound(_)
            | CommerceError::CartItemNotFound => 404,
            CommerceError::MissingField(_)
            | CommerceError::InvalidQuantity(_)
            | CommerceError::InsufficientStock { .. } => 400,
            CommerceError::Duplicate { .. } => 409,
            CommerceError::Overflow
            | CommerceError::Store(_)
            | CommerceError::BlobStore(_)
            | CommerceError::Internal(_) => 500,
        }
    }

    /// The message safe to surface to a client.
    ///
    /// Store and internal causes stay in the logs; clients see a generic
    /// message instead of the raw error.
    pub fn client_message(&self) -> String {
        match self {
            CommerceError::Store(_) | CommerceError::Internal(_) | CommerceError::Overflow => {
                "internal server error".to_string()
            }
            CommerceError::BlobStore(_) => "image upload failed".to_string(),
            other => other.to_string(),
        }
    }
}
