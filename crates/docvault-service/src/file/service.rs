//! File listing and deletion.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::AccessChecker;
use docvault_core::error::AppError;
use docvault_database::repositories::FileRepository;
use docvault_entity::file::File;

use super::blobs::BlobJanitor;
use crate::context::RequestContext;

/// A file in the caller's listing.
#[derive(Debug, Clone)]
pub struct ListedFile {
    /// The file.
    pub file: File,
    /// True when the caller reads it through a grant rather than ownership.
    pub shared: bool,
}

/// Core file operations with access checks.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob storage and cleanup.
    blobs: Arc<BlobJanitor>,
    /// Access checker.
    access: Arc<AccessChecker>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        blobs: Arc<BlobJanitor>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            file_repo,
            blobs,
            access,
        }
    }

    /// Owned files followed by files shared with the caller, each file once
    /// however many grants reach it.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<ListedFile>, AppError> {
        let owned = self.file_repo.list_for_owner(ctx.user_id).await?;
        let shared = self.file_repo.list_shared_with(ctx.user_id).await?;

        let mut seen = HashSet::with_capacity(owned.len() + shared.len());
        let listing = owned
            .into_iter()
            .chain(shared)
            .filter(|file| seen.insert(file.id))
            .map(|file| ListedFile {
                shared: !file.is_owned_by(ctx.user_id),
                file,
            })
            .collect();
        Ok(listing)
    }

    /// Gets a single file the caller can read.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<File, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(AppError::file_not_found)?;
        self.access.require_read(ctx.user_id, &file).await?;
        Ok(file)
    }

    /// Deletes a file with its versions, grants and metadata, then drops the
    /// blobs nothing else references.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> Result<(), AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(AppError::file_not_found)?;
        self.access.require_write(ctx.user_id, &file)?;

        let handles = self
            .file_repo
            .delete(file.id)
            .await?
            .ok_or_else(AppError::file_not_found)?;
        self.blobs.collect(&handles).await;

        info!(user_id = %ctx.user_id, file_id = %file.id, name = %file.name, "File deleted");
        Ok(())
    }
}
