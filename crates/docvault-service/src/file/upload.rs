//! File upload: every upload of a name appends a new version to that file.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use docvault_core::config::StorageConfig;
use docvault_core::error::AppError;
use docvault_database::repositories::FileRepository;
use docvault_entity::file::{File, FileVersion, NewUpload};

use super::blobs::BlobJanitor;
use crate::context::RequestContext;
use crate::folder::service::validate_name as validate_folder_name;

/// Maximum file name length.
const MAX_FILE_NAME_LEN: usize = 255;

/// A decoded upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name, unique per owner.
    pub file_name: String,
    /// Folder to place the file in, found or created by name.
    pub folder_name: Option<String>,
    /// File content.
    pub data: Bytes,
}

/// Handles uploads.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Blob storage and cleanup.
    blobs: Arc<BlobJanitor>,
    /// Storage configuration.
    config: StorageConfig,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        blobs: Arc<BlobJanitor>,
        config: StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            blobs,
            config,
        }
    }

    /// Stores the bytes and records them as the next version of the caller's
    /// file with this name, creating the file on first upload.
    ///
    /// Without a folder name an existing file keeps its folder.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
    ) -> Result<(File, FileVersion), AppError> {
        let file_name = validate_file_name(&req.file_name)?;
        if req.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        // The folder is found or created inside the commit transaction.
        let folder_name = match req.folder_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(validate_folder_name(name)?.to_string()),
            _ => None,
        };

        let content_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();

        let guard = self.blobs.upload_guard().await;
        let blob = self.blobs.put(req.data).await?;

        let committed = self
            .file_repo
            .commit_upload(&NewUpload {
                owner_id: ctx.user_id,
                name: file_name.to_string(),
                folder_name,
                content_type,
                blob_handle: blob.handle.clone(),
                content_hash: blob.content_hash.clone(),
                size_bytes: blob.size as i64,
            })
            .await;
        drop(guard);

        match committed {
            Ok((file, version)) => {
                info!(
                    user_id = %ctx.user_id,
                    file_id = %file.id,
                    version = version.version_number,
                    size = version.size_bytes,
                    "File uploaded"
                );
                Ok((file, version))
            }
            Err(e) => {
                warn!(user_id = %ctx.user_id, name = file_name, error = %e, "Upload commit failed");
                if blob.created {
                    self.blobs.collect(std::slice::from_ref(&blob.handle)).await;
                }
                Err(e)
            }
        }
    }
}

fn validate_file_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("File name must not be empty"));
    }
    if name.chars().count() > MAX_FILE_NAME_LEN {
        return Err(AppError::validation(format!(
            "File name must be at most {MAX_FILE_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
