//! Version history and rollback.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::AccessChecker;
use docvault_core::error::AppError;
use docvault_database::repositories::{FileRepository, VersionRepository};
use docvault_entity::file::{File, FileVersion};

use crate::context::RequestContext;

/// Lists versions and moves a file's current-version pointer.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Version ledger.
    version_repo: Arc<VersionRepository>,
    /// Access checker.
    access: Arc<AccessChecker>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        version_repo: Arc<VersionRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            file_repo,
            version_repo,
            access,
        }
    }

    /// Returns the file and its full history, ascending.
    pub async fn list_versions(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<(File, Vec<FileVersion>), AppError> {
        let file = self.find(file_id).await?;
        self.access.require_read(ctx.user_id, &file).await?;

        let versions = self.version_repo.list(file.id).await?;
        Ok((file, versions))
    }

    /// Points the file at an existing version. History is left untouched, so
    /// rolling forward again is always possible.
    pub async fn rollback(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        version_number: i64,
    ) -> Result<File, AppError> {
        let file = self.find(file_id).await?;
        self.access.require_write(ctx.user_id, &file)?;

        let file = self
            .file_repo
            .rollback(file.id, version_number)
            .await?
            .ok_or_else(|| AppError::version_not_found(version_number))?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            version = version_number,
            "File rolled back"
        );
        Ok(file)
    }

    async fn find(&self, file_id: Uuid) -> Result<File, AppError> {
        self.file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(AppError::file_not_found)
    }
}
