//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid credentials provided.
    ///
    /// Deliberately covers both "unknown username" and "wrong password"
    /// so login failures don't reveal which accounts exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// A unique field already has this value.
    #[error("{field} already taken: {value}")]
    AlreadyTaken {
        field: &'static str,
        value: String,
    },

    /// Token invalid or unknown.
    #[error("token invalid or expired")]
    InvalidToken,

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Password too weak.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Insufficient permissions.
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] casa_db::StoreError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }

    /// The HTTP status code this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpired => 401,
            AuthError::InsufficientPermissions => 403,
            AuthError::UserNotFound(_) => 404,
            AuthError::WeakPassword(_) | AuthError::MissingField(_) => 400,
            AuthError::AlreadyTaken { .. } => 409,
            AuthError::Store(_) | AuthError::Internal(_) => 500,
        }
    }
}
