//! Per-owner folder grouping.
//!
//! A folder is identified by `(owner, name)`. Folders are created lazily by
//! uploads or explicitly, and are never re-parented, so each owner's folders
//! form a forest.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_database::repositories::{FileRepository, FolderRepository};
use docvault_entity::folder::{CreateFolder, FileEntry, Folder, FolderListing, FolderWithFiles};

use crate::context::RequestContext;

/// Maximum folder name length.
const MAX_FOLDER_NAME_LEN: usize = 255;

/// Creates and lists folders.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository (for the grouped listing).
    file_repo: Arc<FileRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, file_repo: Arc<FileRepository>) -> Self {
        Self {
            folder_repo,
            file_repo,
        }
    }

    /// Creates a folder for the caller, or returns the existing one with the
    /// same name. A parent must be one of the caller's folders.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_folder_id: Option<Uuid>,
    ) -> Result<Folder, AppError> {
        let name = validate_name(name)?;

        if let Some(parent_id) = parent_folder_id {
            self.folder_repo
                .find_by_id(parent_id)
                .await?
                .filter(|parent| parent.owner_id == ctx.user_id)
                .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
        }

        let (folder, created) = self
            .folder_repo
            .find_or_create(&CreateFolder {
                owner_id: ctx.user_id,
                name: name.to_string(),
                parent_folder_id,
            })
            .await?;

        if created {
            info!(user_id = %ctx.user_id, folder_id = %folder.id, name, "Folder created");
        }
        Ok(folder)
    }

    /// Returns the owner's folder called `name`, creating a top-level one if
    /// absent. Idempotent.
    pub async fn find_or_create(&self, owner_id: Uuid, name: &str) -> Result<Folder, AppError> {
        let name = validate_name(name)?;
        let (folder, created) = self
            .folder_repo
            .find_or_create(&CreateFolder {
                owner_id,
                name: name.to_string(),
                parent_folder_id: None,
            })
            .await?;

        if created {
            info!(user_id = %owner_id, folder_id = %folder.id, name, "Folder created on upload");
        }
        Ok(folder)
    }

    /// Lists the caller's folders by name.
    pub async fn list_for_owner(&self, ctx: &RequestContext) -> Result<Vec<Folder>, AppError> {
        self.folder_repo.list_for_owner(ctx.user_id).await
    }

    /// Groups the caller's files by folder, with root files listed apart.
    ///
    /// Only owned files are included; a file's folder always belongs to its
    /// owner, so every file lands in exactly one bucket.
    pub async fn list_with_files(&self, ctx: &RequestContext) -> Result<FolderListing, AppError> {
        let folders = self.folder_repo.list_for_owner(ctx.user_id).await?;
        let files = self.file_repo.list_for_owner(ctx.user_id).await?;

        let mut by_folder: HashMap<Uuid, Vec<FileEntry>> = HashMap::new();
        let mut independent_files = Vec::new();
        for file in files {
            let entry = FileEntry {
                file_id: file.id,
                filename: file.name,
            };
            match file.folder_id {
                Some(folder_id) => by_folder.entry(folder_id).or_default().push(entry),
                None => independent_files.push(entry),
            }
        }

        let folders = folders
            .into_iter()
            .map(|folder| FolderWithFiles {
                files: by_folder.remove(&folder.id).unwrap_or_default(),
                folder_id: folder.id,
                folder_name: folder.name,
                parent_folder_id: folder.parent_folder_id,
            })
            .collect();

        Ok(FolderListing {
            folders,
            independent_files,
        })
    }
}

pub(crate) fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name must not be empty"));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name must be at most {MAX_FOLDER_NAME_LEN} characters"
        )));
    }
    Ok(name)
}
