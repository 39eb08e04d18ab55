//! User account types.

use crate::ids::UserId;
use casa_db::Record;
use serde::{Deserialize, Serialize};

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store administrator.
    Admin,
    /// Regular customer.
    #[default]
    User,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

/// A registered user.
///
/// Checkout reads accounts to resolve ownership and the notification
/// recipient; it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address, unique across accounts.
    pub email: String,
    /// Username, unique across accounts.
    pub username: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
}

impl UserAccount {
    /// Check if this account holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Record for UserAccount {
    const TABLE: &'static str = "user";

    fn key(&self) -> String {
        self.id.as_str().to_string()
    }
}
