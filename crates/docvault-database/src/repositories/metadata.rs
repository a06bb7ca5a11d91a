//! File metadata repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::file::FileMetadata;

/// Repository for per-file key/value metadata.
#[derive(Debug, Clone)]
pub struct MetadataRepository {
    pool: SqlitePool,
}

impl MetadataRepository {
    /// Create a new metadata repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All entries of a file, ordered by key.
    pub async fn list(&self, file_id: Uuid) -> AppResult<Vec<FileMetadata>> {
        sqlx::query_as::<_, FileMetadata>(
            "SELECT * FROM file_metadata WHERE file_id = ? ORDER BY key ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list metadata", e))
    }

    /// Insert or overwrite a single entry.
    pub async fn upsert(&self, file_id: Uuid, key: &str, value: &str) -> AppResult<FileMetadata> {
        sqlx::query_as::<_, FileMetadata>(
            "INSERT INTO file_metadata (id, file_id, key, value, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(file_id, key) DO UPDATE SET \
             value = excluded.value, updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(file_id)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write metadata", e))
    }

    /// Remove an entry. Returns false if it did not exist.
    pub async fn delete(&self, file_id: Uuid, key: &str) -> AppResult<bool> {
        sqlx::query("DELETE FROM file_metadata WHERE file_id = ? AND key = ?")
            .bind(file_id)
            .bind(key)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete metadata", e))
    }
}
