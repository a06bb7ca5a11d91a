//! Read/write authorization for files.
//!
//! Reads are allowed to the owner and to anyone holding a grant on the file
//! or on its folder. Writes (upload over, rollback, delete, metadata, share)
//! are owner-only whatever the grant's access type.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_database::repositories::PermissionRepository;
use docvault_entity::file::File;

/// Decides whether a user may read or write a file.
#[derive(Debug, Clone)]
pub struct AccessChecker {
    /// Share grant repository.
    permissions: Arc<PermissionRepository>,
}

impl AccessChecker {
    /// Creates a new access checker.
    pub fn new(permissions: Arc<PermissionRepository>) -> Self {
        Self { permissions }
    }

    /// Whether `user_id` may read `file`.
    pub async fn can_read(&self, user_id: Uuid, file: &File) -> Result<bool, AppError> {
        if file.is_owned_by(user_id) {
            return Ok(true);
        }
        self.permissions
            .has_grant(user_id, file.id, file.folder_id)
            .await
    }

    /// Whether `user_id` may modify `file`.
    pub fn can_write(&self, user_id: Uuid, file: &File) -> bool {
        file.is_owned_by(user_id)
    }

    /// Fails with `FileNotFound` unless `user_id` may read `file`, so the
    /// caller cannot tell a forbidden file from a missing one.
    pub async fn require_read(&self, user_id: Uuid, file: &File) -> Result<(), AppError> {
        if self.can_read(user_id, file).await? {
            Ok(())
        } else {
            debug!(user_id = %user_id, file_id = %file.id, "Read denied");
            Err(AppError::file_not_found())
        }
    }

    /// Write counterpart of [`require_read`](Self::require_read).
    pub fn require_write(&self, user_id: Uuid, file: &File) -> Result<(), AppError> {
        if self.can_write(user_id, file) {
            Ok(())
        } else {
            debug!(user_id = %user_id, file_id = %file.id, "Write denied");
            Err(AppError::file_not_found())
        }
    }
}
