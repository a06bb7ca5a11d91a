//! Blob store trait for content-addressed file bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Outcome of storing a blob.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlobPut {
    /// Opaque handle used to read the blob back.
    pub handle: String,
    /// Hex-encoded SHA-256 of the content.
    pub content_hash: String,
    /// Size in bytes.
    pub size: u64,
    /// `false` when identical content was already stored.
    pub created: bool,
}

/// Trait for raw byte storage backends keyed by an opaque handle.
///
/// Handles are independent of any file or version row. The same bytes
/// stored twice yield the same handle.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store bytes and return their handle.
    async fn put(&self, data: Bytes) -> AppResult<BlobPut>;

    /// Read the bytes behind a handle.
    ///
    /// A missing blob is reported as `ErrorKind::BlobMissing`.
    async fn get(&self, handle: &str) -> AppResult<Bytes>;

    /// Remove a blob. Deleting a missing blob is not an error.
    async fn delete(&self, handle: &str) -> AppResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, handle: &str) -> AppResult<bool>;
}
