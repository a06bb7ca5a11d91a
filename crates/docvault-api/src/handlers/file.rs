//! File upload, download, listing and deletion handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, StatusCode, header};
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_service::UploadRequest as UploadCommand;

use crate::dto::request::{DownloadQuery, UploadRequest};
use crate::dto::response::{DetailResponse, FileResponse, UploadResponse};
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson};
use crate::state::AppState;

/// Response header carrying the version number that was served.
pub const X_FILE_VERSION: HeaderName = HeaderName::from_static("x-file-version");

/// POST /files/upload
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    let data = STANDARD
        .decode(req.file.trim())
        .map_err(|e| AppError::validation(format!("File content is not valid base64: {e}")))?;

    let (file, version) = state
        .upload_service
        .upload(
            &auth,
            UploadCommand {
                file_name: req.file_name,
                folder_name: req.folder_name,
                data: Bytes::from(data),
            },
        )
        .await?;

    Ok(Json(UploadResponse {
        filename: file.name,
        file_id: file.id,
        version_number: version.version_number,
    }))
}

/// GET /files/download/{file_id}?version=N
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DownloadQuery>,
) -> Result<Response, ApiError> {
    let result = state
        .download_service
        .download(&auth, file_id, query.version)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.file.content_type.as_str())
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(&result.file.name),
        )
        .header(header::CONTENT_LENGTH, result.data.len())
        .header(X_FILE_VERSION, result.version.version_number)
        .body(Body::from(result.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// GET /files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let listing = state.file_service.list_for_user(&auth).await?;
    Ok(Json(listing.into_iter().map(FileResponse::from).collect()))
}

/// DELETE /files/{file_id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(file_id): ApiPath<Uuid>,
) -> Result<Json<DetailResponse>, ApiError> {
    state.file_service.delete_file(&auth, file_id).await?;
    Ok(Json(DetailResponse::new("File deleted")))
}

/// `attachment; filename="…"` with quotes and control characters neutralised.
fn content_disposition(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
