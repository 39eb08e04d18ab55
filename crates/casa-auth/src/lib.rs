//! Identity for Casabook.
//!
//! Registration, login, and token verification. The rest of the system
//! consumes a verified [`Identity`] and never touches credentials.

mod error;
pub mod password;
mod service;
mod token;

pub use error::AuthError;
pub use service::{AuthService, Identity, Session};
pub use token::AccessToken;
