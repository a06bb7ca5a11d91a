//! Permission (share grant) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::access_type::AccessType;

/// A grant giving `grantee_id` read access to a file or to every file in a
/// folder. Exactly one of `file_id` / `folder_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique grant identifier.
    pub id: Uuid,
    /// User receiving access.
    pub grantee_id: Uuid,
    /// Target file.
    pub file_id: Option<Uuid>,
    /// Target folder.
    pub folder_id: Option<Uuid>,
    /// Recorded access type.
    pub access_type: AccessType,
    /// User who created the grant.
    pub granted_by: Uuid,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// The resource this grant points at.
    pub fn target(&self) -> Option<GrantTarget> {
        match (self.file_id, self.folder_id) {
            (Some(file_id), None) => Some(GrantTarget::File(file_id)),
            (None, Some(folder_id)) => Some(GrantTarget::Folder(folder_id)),
            _ => None,
        }
    }
}

/// What a grant applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum GrantTarget {
    /// A single file.
    File(Uuid),
    /// Every file inside a folder.
    Folder(Uuid),
}

/// Data required to create a grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    /// User receiving access.
    pub grantee_id: Uuid,
    /// Target resource.
    pub target: GrantTarget,
    /// Recorded access type.
    pub access_type: AccessType,
    /// User creating the grant.
    pub granted_by: Uuid,
}

impl CreatePermission {
    /// Split the target into the two nullable columns.
    pub fn columns(&self) -> (Option<Uuid>, Option<Uuid>) {
        match self.target {
            GrantTarget::File(id) => (Some(id), None),
            GrantTarget::Folder(id) => (None, Some(id)),
        }
    }
}
