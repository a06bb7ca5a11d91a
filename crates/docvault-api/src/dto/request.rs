//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use docvault_core::types::FileSearchFilter;
use docvault_entity::permission::AccessType;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl From<RegisterRequest> for docvault_service::RegisterRequest {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Upload request body. `file` carries the content as standard base64.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadRequest {
    /// File name, unique per owner.
    #[validate(length(min = 1, max = 255, message = "File name must be 1 to 255 characters"))]
    pub file_name: String,
    /// Base64-encoded content.
    pub file: String,
    /// Folder to file it under, found or created by name.
    #[serde(default)]
    pub folder_name: Option<String>,
}

/// Download query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// Version to read; the current version when absent.
    pub version: Option<i64>,
}

/// Rollback request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RollbackRequest {
    /// File to roll back.
    pub file_id: Uuid,
    /// Version to make current.
    #[validate(range(min = 1, message = "Version numbers start at 1"))]
    pub version_number: i64,
}

/// Search query parameters. Dates are RFC 3339.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring of the file name.
    pub keyword: Option<String>,
    /// Exact content type or a family such as `image/*`.
    pub file_type: Option<String>,
    /// Inclusive lower bound on creation time.
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time.
    pub created_before: Option<DateTime<Utc>>,
}

impl From<SearchQuery> for FileSearchFilter {
    fn from(query: SearchQuery) -> Self {
        Self {
            keyword: query.keyword,
            content_type: query.file_type,
            created_after: query.created_after,
            created_before: query.created_before,
        }
    }
}

/// Metadata upsert body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MetadataRequest {
    /// Key, unique per file.
    #[validate(length(min = 1, max = 50, message = "Metadata key must be 1 to 50 characters"))]
    pub key: String,
    /// Value.
    pub value: String,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name must be 1 to 255 characters"))]
    pub name: String,
    /// Parent folder ID.
    #[serde(default)]
    pub parent_folder_id: Option<Uuid>,
}

/// Share request body, for files and folders alike.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareRequest {
    /// Who receives access.
    #[validate(length(min = 1, message = "Grantee username is required"))]
    pub grantee_username: String,
    /// Recorded access type.
    #[serde(default)]
    pub access_type: AccessType,
}
