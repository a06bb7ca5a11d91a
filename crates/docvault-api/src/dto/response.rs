//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_auth::jwt::AccessToken;
use docvault_database::repositories::GrantWithUser;
use docvault_entity::file::{File, FileMetadata, FileVersion};
use docvault_entity::folder::Folder;
use docvault_entity::permission::AccessType;
use docvault_entity::user::User;
use docvault_service::ListedFile;

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Expiry of the token.
    pub expires_at: DateTime<Utc>,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.token,
            token_type: "bearer".to_string(),
            expires_at: token.expires_at,
        }
    }
}

/// The caller's own account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Result of an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored file name.
    pub filename: String,
    /// File ID.
    pub file_id: Uuid,
    /// Version created by this upload.
    pub version_number: i64,
}

/// A file in a listing or search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    /// File ID.
    pub file_id: Uuid,
    /// File name.
    pub filename: String,
    /// Current version number.
    pub current_version: i64,
    /// Size of the current version in bytes.
    pub size: i64,
    /// Content type.
    pub content_type: String,
    /// Owner.
    pub owner_id: Uuid,
    /// Whether the caller reads it through a grant.
    pub shared: bool,
}

impl FileResponse {
    /// Shapes a file as seen by `viewer`.
    pub fn for_viewer(file: File, viewer: Uuid) -> Self {
        Self {
            shared: !file.is_owned_by(viewer),
            file_id: file.id,
            filename: file.name,
            current_version: file.current_version,
            size: file.size_bytes,
            content_type: file.content_type,
            owner_id: file.owner_id,
        }
    }
}

impl From<ListedFile> for FileResponse {
    fn from(listed: ListedFile) -> Self {
        let file = listed.file;
        Self {
            file_id: file.id,
            filename: file.name,
            current_version: file.current_version,
            size: file.size_bytes,
            content_type: file.content_type,
            owner_id: file.owner_id,
            shared: listed.shared,
        }
    }
}

/// One entry of a file's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Version number.
    pub version_number: i64,
    /// Size in bytes.
    pub size: i64,
    /// Hex SHA-256 of the content.
    pub content_hash: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Whether the file currently points at this version.
    pub is_current: bool,
}

impl VersionResponse {
    /// Shapes a version, marking it current when `current_version` matches.
    pub fn new(version: FileVersion, current_version: i64) -> Self {
        Self {
            is_current: version.version_number == current_version,
            version_number: version.version_number,
            size: version.size_bytes,
            content_hash: version.content_hash,
            created_at: version.created_at,
        }
    }
}

/// Result of a rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackResponse {
    /// Message.
    pub message: String,
    /// File ID.
    pub file_id: Uuid,
    /// The version now current.
    pub current_version: i64,
    /// Size of that version.
    pub size: i64,
}

/// One metadata entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataResponse {
    /// Key.
    pub key: String,
    /// Value.
    pub value: String,
}

impl From<FileMetadata> for MetadataResponse {
    fn from(entry: FileMetadata) -> Self {
        Self {
            key: entry.key,
            value: entry.value,
        }
    }
}

/// A folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderResponse {
    /// Folder ID.
    pub folder_id: Uuid,
    /// Folder name.
    pub folder_name: String,
    /// Parent folder, if any.
    pub parent_folder_id: Option<Uuid>,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            folder_id: folder.id,
            folder_name: folder.name,
            parent_folder_id: folder.parent_folder_id,
            created_at: folder.created_at,
        }
    }
}

/// A grant on a file, as shown to its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    /// Who holds the grant.
    pub grantee_username: String,
    /// Recorded access type.
    pub access_type: AccessType,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<GrantWithUser> for GrantResponse {
    fn from(grant: GrantWithUser) -> Self {
        Self {
            grantee_username: grant.grantee_username,
            access_type: grant.permission.access_type,
            created_at: grant.permission.created_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement of a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    /// Detail.
    pub detail: String,
}

impl DetailResponse {
    /// Wraps a detail string.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when a backend check fails.
    pub status: String,
    /// Version.
    pub version: String,
}
