//! Route definitions for the DocVault HTTP API.
//!
//! All routes are organized by domain and mounted under the configured
//! `server.api_prefix`. The router receives `AppState` and passes it to all
//! handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route and the body size limit.
pub fn build_router(state: AppState) -> Router {
    let max_body =
        usize::try_from(state.config.storage.max_upload_size_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(file_routes())
        .merge(folder_routes())
        .merge(share_routes());

    let prefix = state.config.server.api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(prefix, api_routes)
    };

    router
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Registration, login, profile. The `/auth/oauth/*` paths are aliases kept
/// for form-login clients.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/oauth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/oauth/login", post(handlers::auth::login))
        .route("/auth/profile", get(handlers::auth::profile))
}

/// Upload, download, listing, versions, metadata
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files/search", get(handlers::search::search_files))
        .route("/files/rollback", post(handlers::version::rollback))
        .route(
            "/files/download/{file_id}",
            get(handlers::file::download_file),
        )
        .route("/files/{file_id}", delete(handlers::file::delete_file))
        .route(
            "/files/{file_id}/versions",
            get(handlers::version::list_versions),
        )
        .route(
            "/files/{file_id}/metadata",
            get(handlers::metadata::list_metadata).put(handlers::metadata::set_metadata),
        )
        .route(
            "/files/{file_id}/metadata/{key}",
            delete(handlers::metadata::delete_metadata),
        )
}

fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/files-and-folders",
            get(handlers::folder::list_files_and_folders),
        )
}

fn share_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/share_file/{file_id}",
            get(handlers::share::list_file_grants).post(handlers::share::share_file),
        )
        .route(
            "/share_folder/{folder_id}",
            post(handlers::share::share_folder),
        )
}
