//! File download, current or a specific version.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use docvault_auth::acl::AccessChecker;
use docvault_core::error::AppError;
use docvault_database::repositories::{FileRepository, VersionRepository};
use docvault_entity::file::{File, FileVersion};

use super::blobs::BlobJanitor;
use crate::context::RequestContext;

/// Bytes of one version together with the records describing them.
#[derive(Debug, Clone)]
pub struct Download {
    /// The file.
    pub file: File,
    /// The version that was read.
    pub version: FileVersion,
    /// The content.
    pub data: Bytes,
}

/// Serves file content to readers.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Version ledger.
    version_repo: Arc<VersionRepository>,
    /// Blob storage.
    blobs: Arc<BlobJanitor>,
    /// Access checker.
    access: Arc<AccessChecker>,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        version_repo: Arc<VersionRepository>,
        blobs: Arc<BlobJanitor>,
        access: Arc<AccessChecker>,
    ) -> Self {
        Self {
            file_repo,
            version_repo,
            blobs,
            access,
        }
    }

    /// Reads `version_number`, or the file's current version when absent.
    ///
    /// A missing file, version, or blob each fail with their own not-found
    /// kind.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        version_number: Option<i64>,
    ) -> Result<Download, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .ok_or_else(AppError::file_not_found)?;
        self.access.require_read(ctx.user_id, &file).await?;

        let number = version_number.unwrap_or(file.current_version);
        let version = self
            .version_repo
            .get(file.id, number)
            .await?
            .ok_or_else(|| AppError::version_not_found(number))?;

        let data = self.blobs.store().get(&version.blob_handle).await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            version = version.version_number,
            "File downloaded"
        );
        Ok(Download {
            file,
            version,
            data,
        })
    }
}
