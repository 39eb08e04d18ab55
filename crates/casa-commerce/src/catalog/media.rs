//! Image storage boundary.

use crate::CommerceError;

/// An image file received from a client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl Upload {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
        }
    }
}

/// Opaque blob storage returning a public URL.
///
/// The real CDN-backed implementation lives outside this workspace;
/// checkout never touches this boundary, only catalog management does.
pub trait BlobStore: Send + Sync {
    /// Store the bytes under `folder/filename` and return the public URL.
    fn upload(&self, bytes: &[u8], filename: &str, folder: &str) -> Result<String, CommerceError>;
}

/// Blob store that fabricates stable URLs without storing anything.
///
/// Used in development and tests.
#[derive(Debug, Clone, Default)]
pub struct LocalBlobStore {
    base_url: Option<String>,
}

impl LocalBlobStore {
    /// Create a local blob store serving from the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

impl BlobStore for LocalBlobStore {
    fn upload(&self, bytes: &[u8], filename: &str, folder: &str) -> Result<String, CommerceError> {
        if bytes.is_empty() {
            return Err(CommerceError::BlobStore("empty upload".to_string()));
        }
        let base = self.base_url.as_deref().unwrap_or("https://cdn.local");
        Ok(format!("{base}/{folder}/{filename}"))
    }
}
