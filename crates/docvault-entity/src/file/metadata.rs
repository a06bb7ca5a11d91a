//! Key/value metadata attached to a file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum length of a metadata key.
pub const MAX_METADATA_KEY_LEN: usize = 50;

/// A single metadata entry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileMetadata {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The file this entry describes.
    pub file_id: Uuid,
    /// Key, unique per file.
    pub key: String,
    /// Free-form value.
    pub value: String,
    /// When the entry was last written.
    pub updated_at: DateTime<Utc>,
}
