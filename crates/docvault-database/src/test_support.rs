//! Fixtures shared by the repository tests.

use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use docvault_core::config::DatabaseConfig;
use docvault_entity::file::NewUpload;
use docvault_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::UserRepository;

/// A migrated database living in its own temp directory.
pub(crate) struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub(crate) async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("test.db").display()),
        ..Default::default()
    };
    let pool = DatabasePool::connect(&config).await.unwrap().into_pool();
    run_migrations(&pool).await.unwrap();
    TestDb { pool, _dir: dir }
}

pub(crate) async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    UserRepository::new(pool.clone())
        .create(&CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .unwrap()
}

pub(crate) fn upload(owner_id: Uuid, name: &str, body: &str) -> NewUpload {
    NewUpload {
        owner_id,
        name: name.to_string(),
        folder_name: None,
        content_type: "text/plain".to_string(),
        blob_handle: format!("handle-{body}"),
        content_hash: format!("hash-{body}"),
        size_bytes: body.len() as i64,
    }
}
