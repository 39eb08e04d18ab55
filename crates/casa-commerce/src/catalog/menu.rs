//! Cafe menu types.

use crate::ids::MenuItemId;
use crate::money::Money;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// An item on the cafe menu.
///
/// Menu items carry no stock; they are made to order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Unique menu item identifier.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Price.
    pub price: Money,
    /// Photo URL.
    pub image_url: String,
}

impl Record for MenuItem {
    const TABLE: &'static str = "menu";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}
