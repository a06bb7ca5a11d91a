//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docvault_auth::acl::AccessChecker;
use docvault_auth::jwt::{JwtDecoder, JwtEncoder};
use docvault_auth::password::{PasswordHasher, PasswordValidator};
use docvault_core::config::AppConfig;
use docvault_core::traits::BlobStore;
use docvault_database::DatabasePool;
use docvault_database::repositories::{
    FileRepository, FolderRepository, MetadataRepository, PermissionRepository, UserRepository,
    VersionRepository,
};
use docvault_service::{
    BlobJanitor, DownloadService, FileService, FolderService, MetadataService, SearchService,
    ShareService, UploadService, UserService, VersionService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: DatabasePool,
    /// Content-addressed blob store
    pub blob_store: Arc<dyn BlobStore>,

    // ── Services ─────────────────────────────────────────────
    /// Registration, login and token authentication
    pub user_service: Arc<UserService>,
    /// Listing and deletion
    pub file_service: Arc<FileService>,
    /// Uploads
    pub upload_service: Arc<UploadService>,
    /// Downloads
    pub download_service: Arc<DownloadService>,
    /// Version history and rollback
    pub version_service: Arc<VersionService>,
    /// File search
    pub search_service: Arc<SearchService>,
    /// Folders
    pub folder_service: Arc<FolderService>,
    /// Share grants
    pub share_service: Arc<ShareService>,
    /// Per-file metadata
    pub metadata_service: Arc<MetadataService>,
}

impl AppState {
    /// Wires repositories, auth and services over an open pool and blob store.
    pub fn build(config: AppConfig, db: DatabasePool, blob_store: Arc<dyn BlobStore>) -> Self {
        let pool = db.pool().clone();

        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let version_repo = Arc::new(VersionRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let permission_repo = Arc::new(PermissionRepository::new(pool.clone()));
        let metadata_repo = Arc::new(MetadataRepository::new(pool));

        // ── Auth ─────────────────────────────────────────────
        let access = Arc::new(AccessChecker::new(Arc::clone(&permission_repo)));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));

        // ── Services ─────────────────────────────────────────
        let blobs = Arc::new(BlobJanitor::new(
            Arc::clone(&blob_store),
            Arc::clone(&version_repo),
        ));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folder_repo),
            Arc::clone(&file_repo),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&file_repo),
            Arc::clone(&blobs),
            Arc::clone(&access),
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&file_repo),
            Arc::clone(&blobs),
            config.storage.clone(),
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&file_repo),
            Arc::clone(&version_repo),
            Arc::clone(&blobs),
            Arc::clone(&access),
        ));
        let version_service = Arc::new(VersionService::new(
            Arc::clone(&file_repo),
            version_repo,
            Arc::clone(&access),
        ));
        let search_service = Arc::new(SearchService::new(Arc::clone(&file_repo)));
        let share_service = Arc::new(ShareService::new(
            permission_repo,
            Arc::clone(&file_repo),
            folder_repo,
            user_repo,
        ));
        let metadata_service = Arc::new(MetadataService::new(metadata_repo, file_repo, access));

        Self {
            config: Arc::new(config),
            db,
            blob_store,
            user_service,
            file_service,
            upload_service,
            download_service,
            version_service,
            search_service,
            folder_service,
            share_service,
            metadata_service,
        }
    }
}
