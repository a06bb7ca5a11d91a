//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await.unwrap_or(false);
    let blobs = state.blob_store.health_check().await.unwrap_or(false);

    if !(database && blobs) {
        tracing::warn!(database, blobs, "Health check degraded");
    }

    Json(HealthResponse {
        status: if database && blobs { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
