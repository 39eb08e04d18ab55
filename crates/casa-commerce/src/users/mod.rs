//! User accounts and roles.

mod account;

pub use account::{Role, UserAccount};
