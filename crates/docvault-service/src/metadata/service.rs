//! Metadata reads for readers, writes for owners.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::AccessChecker;
use docvault_core::error::AppError;
use docvault_database::repositories::{FileRepository, MetadataRepository};
use docvault_entity::file::metadata::MAX_METADATA_KEY_LEN;
use docvault_entity::file::{File, FileMetadata};

use crate::context::RequestContext;

/// Reads and writes file metadata.
#[derive(Debug, Clone)]
pub struct MetadataService {
    /// Metadata repository.
    metadata_repo: Arc<MetadataRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Access checker.
    access: Arc<AccessChecker>,
}

impl MetadataService {
    /// Creates a new metadata service.
    pub fn new(
        metadata_repo: Arc<MetadataRepository>,
        file_repo: Arc<FileRepository>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            metadata_repo,
            file_repo,
            access,
        }
    }

    /// All entries of a readable file, by key.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<Vec<FileMetadata>, AppError> {
        let file = self.find(file_id).await?;
        self.access.require_read(ctx.user_id, &file).await?;
        self.metadata_repo.list(file.id).await
    }

    /// Sets one entry on an owned file, replacing any previous value.
    pub async fn set(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<FileMetadata, AppError> {
        let key = key.trim();
        if key.is_empty() || key.chars().count() > MAX_METADATA_KEY_LEN {
            return Err(AppError::validation(format!(
                "Metadata key must be 1 to {MAX_METADATA_KEY_LEN} characters"
            )));
        }

        let file = self.find(file_id).await?;
        self.access.require_write(ctx.user_id, &file)?;

        let entry = self.metadata_repo.upsert(file.id, key, value).await?;
        info!(user_id = %ctx.user_id, file_id = %file.id, key, "Metadata updated");
        Ok(entry)
    }

    /// Removes one entry from an owned file.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        key: &str,
    ) -> Result<(), AppError> {
        let file = self.find(file_id).await?;
        self.access.require_write(ctx.user_id, &file)?;

        if !self.metadata_repo.delete(file.id, key).await? {
            return Err(AppError::not_found(format!("Metadata key '{key}' not found")));
        }
        info!(user_id = %ctx.user_id, file_id = %file.id, key, "Metadata deleted");
        Ok(())
    }

    async fn find(&self, file_id: Uuid) -> Result<File, AppError> {
        self.file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(AppError::file_not_found)
    }
}
