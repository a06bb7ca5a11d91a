//! Per-file metadata handlers.

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use crate::dto::request::MetadataRequest;
use crate::dto::response::{DetailResponse, MetadataResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /files/{file_id}/metadata
pub async fn list_metadata(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
) -> Result<Json<Vec<MetadataResponse>>, ApiError> {
    let entries = state.metadata_service.list(&auth, file_id).await?;
    Ok(Json(entries.into_iter().map(MetadataResponse::from).collect()))
}

/// PUT /files/{file_id}/metadata
pub async fn set_metadata(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
    ValidatedJson(req): ValidatedJson<MetadataRequest>,
) -> Result<Json<MetadataResponse>, ApiError> {
    let entry = state
        .metadata_service
        .set(&auth, file_id, &req.key, &req.value)
        .await?;
    Ok(Json(entry.into()))
}

/// DELETE /files/{file_id}/metadata/{key}
pub async fn delete_metadata(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath((file_id, key)): ApiPath<(Uuid, String)>,
) -> Result<Json<DetailResponse>, ApiError> {
    state.metadata_service.delete(&auth, file_id, &key).await?;
    Ok(Json(DetailResponse::new("Metadata deleted")))
}
