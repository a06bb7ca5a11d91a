//! Fully wired services over a temp database and blob root.

use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use docvault_auth::acl::AccessChecker;
use docvault_auth::jwt::{JwtDecoder, JwtEncoder};
use docvault_auth::password::{PasswordHasher, PasswordValidator};
use docvault_core::config::{AuthConfig, DatabaseConfig, StorageConfig};
use docvault_core::traits::BlobStore;
use docvault_database::migration::run_migrations;
use docvault_database::repositories::{
    FileRepository, FolderRepository, MetadataRepository, PermissionRepository, UserRepository,
    VersionRepository,
};
use docvault_database::DatabasePool;
use docvault_entity::file::{File, FileVersion};
use docvault_entity::user::CreateUser;
use docvault_storage::LocalBlobStore;

use crate::context::RequestContext;
use crate::file::{
    BlobJanitor, DownloadService, FileService, SearchService, UploadRequest, UploadService,
    VersionService,
};
use crate::folder::FolderService;
use crate::metadata::MetadataService;
use crate::share::ShareService;
use crate::user::UserService;

pub(crate) struct TestServices {
    pub users: UserService,
    pub files: FileService,
    pub uploads: UploadService,
    pub downloads: DownloadService,
    pub versions: VersionService,
    pub search: SearchService,
    pub folders: FolderService,
    pub shares: ShareService,
    pub metadata: MetadataService,
    pub blob_store: Arc<dyn BlobStore>,
    user_repo: Arc<UserRepository>,
    _dir: TempDir,
}

impl TestServices {
    pub async fn new() -> Self {
        Self::with_max_upload(StorageConfig::default().max_upload_size_bytes).await
    }

    pub async fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("service.db").display()),
            ..Default::default()
        };
        let pool = DatabasePool::connect(&db_config).await.unwrap().into_pool();
        run_migrations(&pool).await.unwrap();

        let storage_config = StorageConfig {
            max_upload_size_bytes,
            ..Default::default()
        };
        let blob_store: Arc<dyn BlobStore> = Arc::new(
            LocalBlobStore::new(dir.path().join("blobs").to_str().unwrap())
                .await
                .unwrap(),
        );

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let version_repo = Arc::new(VersionRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let permission_repo = Arc::new(PermissionRepository::new(pool.clone()));
        let metadata_repo = Arc::new(MetadataRepository::new(pool.clone()));

        let auth_config = AuthConfig {
            jwt_secret: "service-test-secret".into(),
            ..Default::default()
        };
        let access = Arc::new(AccessChecker::new(Arc::clone(&permission_repo)));
        let blobs = Arc::new(BlobJanitor::new(
            Arc::clone(&blob_store),
            Arc::clone(&version_repo),
        ));
        let folders = FolderService::new(Arc::clone(&folder_repo), Arc::clone(&file_repo));

        Self {
            users: UserService::new(
                Arc::clone(&user_repo),
                Arc::new(PasswordHasher::new()),
                Arc::new(PasswordValidator::new(&auth_config)),
                Arc::new(JwtEncoder::new(&auth_config)),
                Arc::new(JwtDecoder::new(&auth_config)),
            ),
            files: FileService::new(Arc::clone(&file_repo), Arc::clone(&blobs), Arc::clone(&access)),
            uploads: UploadService::new(
                Arc::clone(&file_repo),
                Arc::clone(&blobs),
                storage_config,
            ),
            downloads: DownloadService::new(
                Arc::clone(&file_repo),
                Arc::clone(&version_repo),
                Arc::clone(&blobs),
                Arc::clone(&access),
            ),
            versions: VersionService::new(
                Arc::clone(&file_repo),
                Arc::clone(&version_repo),
                Arc::clone(&access),
            ),
            search: SearchService::new(Arc::clone(&file_repo)),
            folders,
            shares: ShareService::new(
                permission_repo,
                Arc::clone(&file_repo),
                folder_repo,
                Arc::clone(&user_repo),
            ),
            metadata: MetadataService::new(metadata_repo, file_repo, access),
            blob_store,
            user_repo,
            _dir: dir,
        }
    }

    /// Inserts a user directly, skipping password hashing.
    pub async fn user(&self, username: &str) -> RequestContext {
        let user = self
            .user_repo
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password_hash: "unused".to_string(),
            })
            .await
            .unwrap();
        RequestContext::new(user.id, user.username)
    }

    pub async fn upload(
        &self,
        ctx: &RequestContext,
        name: &str,
        body: &str,
    ) -> (File, FileVersion) {
        self.uploads
            .upload(
                ctx,
                UploadRequest {
                    file_name: name.to_string(),
                    folder_name: None,
                    data: Bytes::from(body.to_string()),
                },
            )
            .await
            .unwrap()
    }

    pub async fn upload_in(
        &self,
        ctx: &RequestContext,
        folder: &str,
        name: &str,
        body: &str,
    ) -> (File, FileVersion) {
        self.uploads
            .upload(
                ctx,
                UploadRequest {
                    file_name: name.to_string(),
                    folder_name: Some(folder.to_string()),
                    data: Bytes::from(body.to_string()),
                },
            )
            .await
            .unwrap()
    }
}
