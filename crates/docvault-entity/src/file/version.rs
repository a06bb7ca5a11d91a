//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One immutable entry in a file's version ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileVersion {
    /// Unique version row identifier.
    pub id: Uuid,
    /// The file this version belongs to.
    pub file_id: Uuid,
    /// Sequential version number, starting at 1.
    pub version_number: i64,
    /// Size in bytes.
    pub size_bytes: i64,
    /// SHA-256 checksum of the content.
    pub content_hash: String,
    /// Blob store handle.
    pub blob_handle: String,
    /// User who uploaded this version.
    pub created_by: Uuid,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}
