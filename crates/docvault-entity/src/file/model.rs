//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A logical file: one name per owner, backed by a ledger of versions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file owner.
    pub owner_id: Uuid,
    /// File name, unique per owner.
    pub name: String,
    /// Containing folder (null means root).
    pub folder_id: Option<Uuid>,
    /// Size in bytes of the current version.
    pub size_bytes: i64,
    /// MIME type.
    pub content_type: String,
    /// Version number the file currently points at.
    ///
    /// Zero only inside the upload transaction that creates the file.
    pub current_version: i64,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Check whether `user_id` owns this file.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Check if the file sits at the root (no folder).
    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Everything the repository needs to record one upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUpload {
    /// Uploading user (and owner when the file is new).
    pub owner_id: Uuid,
    /// File name.
    pub name: String,
    /// Folder to file under, found or created by name with the upload.
    /// `None` keeps an existing file's folder.
    pub folder_name: Option<String>,
    /// MIME type.
    pub content_type: String,
    /// Blob handle returned by the blob store.
    pub blob_handle: String,
    /// SHA-256 of the bytes.
    pub content_hash: String,
    /// Size in bytes.
    pub size_bytes: i64,
}
