//! Folder handlers.

use axum::Json;
use axum::extract::State;

use docvault_entity::folder::FolderListing;

use crate::dto::request::CreateFolderRequest;
use crate::dto::response::FolderResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /folders
///
/// Creating a name that already exists returns the existing folder.
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = state
        .folder_service
        .create(&auth, &req.name, req.parent_folder_id)
        .await?;
    Ok(Json(folder.into()))
}

/// GET /folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = state.folder_service.list_for_owner(&auth).await?;
    Ok(Json(folders.into_iter().map(FolderResponse::from).collect()))
}

/// GET /files-and-folders
pub async fn list_files_and_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FolderListing>, ApiError> {
    let listing = state.folder_service.list_with_files(&auth).await?;
    Ok(Json(listing))
}
