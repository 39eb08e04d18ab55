//! Cart: per-user pending purchase lines.

mod line;
mod service;

pub use line::{CartLine, CartStatus};
pub use service::{CartEntry, CartService};
