//! File search handler.

use axum::Json;
use axum::extract::State;

use crate::dto::request::SearchQuery;
use crate::dto::response::FileResponse;
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser};
use crate::state::AppState;

/// GET /files/search
pub async fn search_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let files = state.search_service.search(&auth, &query.into()).await?;
    Ok(Json(
        files
            .into_iter()
            .map(|file| FileResponse::for_viewer(file, auth.user_id))
            .collect(),
    ))
}
