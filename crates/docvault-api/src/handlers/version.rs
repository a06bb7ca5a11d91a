//! Version history and rollback handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::dto::request::RollbackRequest;
use crate::dto::response::{RollbackResponse, VersionResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /files/{file_id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
) -> Result<Json<Vec<VersionResponse>>, ApiError> {
    let (file, versions) = state.version_service.list_versions(&auth, file_id).await?;
    Ok(Json(
        versions
            .into_iter()
            .map(|v| VersionResponse::new(v, file.current_version))
            .collect(),
    ))
}

/// POST /files/rollback
pub async fn rollback(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RollbackRequest>,
) -> Result<Json<RollbackResponse>, ApiError> {
    let file = state
        .version_service
        .rollback(&auth, req.file_id, req.version_number)
        .await?;

    Ok(Json(RollbackResponse {
        message: "File rolled back successfully".to_string(),
        file_id: file.id,
        current_version: file.current_version,
        size: file.size_bytes,
    }))
}
