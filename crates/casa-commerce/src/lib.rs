//! Bookstore and cafe commerce domain for Casabook.
//!
//! This crate provides the domain types and the checkout workflow:
//!
//! - **Catalog**: Books, labels, cafe menu items, stock tracking
//! - **Cart**: Per-user pending lines with consolidation on add
//! - **Checkout**: Cart and direct purchase into durable orders with
//!   stock decrement, loyalty accrual, and confirmation email
//! - **Loyalty**: Cumulative purchase points and the derived level tier
//! - **Reports**: Best sellers and order volume over time
//!
//! # Example
//!
//! ```rust,ignore
//! use casa_commerce::prelude::*;
//! use casa_mail::ConsoleMailer;
//! use std::sync::Arc;
//!
//! let store = casa_db::Store::new();
//! let checkout = CheckoutService::new(store.clone(), Arc::new(ConsoleMailer::default()));
//!
//! let confirmation = checkout.direct_order(
//!     &user_id,
//!     &book_id,
//!     2,
//!     Recipient::new("An Nguyen", "0901234567", "12 Tran Phu, Da Nang"),
//! )?;
//! println!("placed {} order(s)", confirmation.orders.len());
//! ```

pub mod api;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod loyalty;
pub mod orders;
pub mod reports;
pub mod users;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        BlobStore, Book, BookDraft, BookKind, CatalogService, Label, MenuItem, Stock, Upload,
    };

    // Cart
    pub use crate::cart::{CartEntry, CartLine, CartService, CartStatus};

    // Orders
    pub use crate::orders::{Order, OrderDetail, OrderStatus, PlacedOrder, Recipient};

    // Loyalty
    pub use crate::loyalty::{LevelUser, LoyaltyLevel, PointPurchase};

    // Checkout
    pub use crate::checkout::{CheckoutService, OrderConfirmation};

    // Users
    pub use crate::users::{Role, UserAccount};

    // Reports
    pub use crate::reports::{BestSeller, DailyOrderCount};
}
