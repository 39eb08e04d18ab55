//! API response envelope.
//!
//! The HTTP layer lives outside this workspace; this module fixes the
//! payload shape and status codes it must observe.

use serde::Serialize;

use crate::CommerceError;

/// The `{status, message, data}` envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable outcome.
    pub message: String,
    /// The payload, absent on errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A 200 response with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A 201 response with a payload.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            message: message.into(),
            data: Some(data),
        }
    }

    /// An error response; internal causes are redacted.
    pub fn error(err: &CommerceError) -> Self {
        Self {
            status: err.status_code(),
            message: err.client_message(),
            data: None,
        }
    }
}
