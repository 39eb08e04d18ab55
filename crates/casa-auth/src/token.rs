//! Opaque bearer tokens.

use casa_commerce::ids::UserId;
use casa_db::Record;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Default token lifetime: 30 days, matching the login session length.
const DEFAULT_EXPIRY_SECS: i64 = 30 * 24 * 60 * 60;

/// A stored access token.
///
/// The token string itself is the lookup key; it carries no claims, so
/// revocation is just row deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The opaque token value.
    pub token: String,
    /// User this token authenticates.
    pub user_id: UserId,
    /// Unix timestamp when the token was created.
    pub created_at: i64,
    /// Unix timestamp when the token expires.
    pub expires_at: i64,
}

impl AccessToken {
    /// Generate a new token for the user with the default lifetime.
    pub fn generate(user_id: UserId) -> Self {
        Self::generate_with_expiry(user_id, DEFAULT_EXPIRY_SECS)
    }

    /// Generate a token with a custom lifetime.
    pub fn generate_with_expiry(user_id: UserId, expiry_secs: i64) -> Self {
        let now = current_timestamp();
        Self {
            token: generate_token_string(),
            user_id,
            created_at: now,
            expires_at: now + expiry_secs,
        }
    }

    /// Check if the token is expired.
    pub fn is_expired(&self) -> bool {
        current_timestamp() > self.expires_at
    }

    /// Validate the token.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_expired() {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }
}

impl Record for AccessToken {
    const TABLE: &'static str = "access_token";

    fn key(&self) -> String {
        self.token.clone()
    }
}

/// Generate a cryptographically secure token string.
fn generate_token_string() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 24] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
