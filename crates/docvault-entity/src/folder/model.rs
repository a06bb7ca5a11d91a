//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named group of files belonging to one owner.
///
/// `(owner_id, name)` identifies a folder; folders form a forest per owner
/// and are never re-parented after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Folder name, unique per owner.
    pub name: String,
    /// Parent folder ID (null for top-level folders).
    pub parent_folder_id: Option<Uuid>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a top-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Owner of the new folder.
    pub owner_id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder (None for top level).
    pub parent_folder_id: Option<Uuid>,
}
