//! Share grant handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::dto::request::ShareRequest;
use crate::dto::response::{GrantResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /share_file/{file_id}
pub async fn share_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ShareRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .share_service
        .share_file(&auth, file_id, req.grantee_username.trim(), req.access_type)
        .await?;
    Ok(Json(MessageResponse::new("File shared successfully")))
}

/// GET /share_file/{file_id}
pub async fn list_file_grants(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
) -> Result<Json<Vec<GrantResponse>>, ApiError> {
    let grants = state.share_service.list_file_grants(&auth, file_id).await?;
    Ok(Json(grants.into_iter().map(GrantResponse::from).collect()))
}

/// POST /share_folder/{folder_id}
pub async fn share_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(folder_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<ShareRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .share_service
        .share_folder(&auth, folder_id, req.grantee_username.trim(), req.access_type)
        .await?;
    Ok(Json(MessageResponse::new("Folder shared successfully")))
}
