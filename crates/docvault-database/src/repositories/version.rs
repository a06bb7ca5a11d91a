//! Version ledger: the append-only version history of each file.
//!
//! Version numbers are contiguous from 1 per file. `append` must run inside
//! the transaction that owns the file row so the `MAX + 1` read and the
//! insert cannot interleave with another writer; `UNIQUE(file_id,
//! version_number)` backs this up.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::file::{FileVersion, NewUpload};

/// Repository over the `file_versions` table.
#[derive(Debug, Clone)]
pub struct VersionRepository {
    pool: SqlitePool,
}

impl VersionRepository {
    /// Create a new version repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append the next version for `file_id` on an open transaction.
    pub async fn append(
        conn: &mut SqliteConnection,
        file_id: Uuid,
        upload: &NewUpload,
    ) -> Result<FileVersion, sqlx::Error> {
        let next: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(version_number), 0) + 1 FROM file_versions WHERE file_id = ?",
        )
        .bind(file_id)
        .fetch_one(&mut *conn)
        .await?;

        sqlx::query_as::<_, FileVersion>(
            "INSERT INTO file_versions \
             (id, file_id, version_number, size_bytes, content_hash, blob_handle, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(file_id)
        .bind(next)
        .bind(upload.size_bytes)
        .bind(&upload.content_hash)
        .bind(&upload.blob_handle)
        .bind(upload.owner_id)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await
    }

    /// Distinct blob handles referenced by a file's versions.
    pub async fn handles_for_file(
        conn: &mut SqliteConnection,
        file_id: Uuid,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT DISTINCT blob_handle FROM file_versions WHERE file_id = ?")
            .bind(file_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Get a specific version of a file.
    pub async fn get(&self, file_id: Uuid, version_number: i64) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = ? AND version_number = ?",
        )
        .bind(file_id)
        .bind(version_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find version", e))
    }

    /// All versions of a file, ascending by version number.
    pub async fn list(&self, file_id: Uuid) -> AppResult<Vec<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = ? ORDER BY version_number ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list versions", e))
    }

    /// The highest-numbered version of a file.
    pub async fn latest(&self, file_id: Uuid) -> AppResult<Option<FileVersion>> {
        sqlx::query_as::<_, FileVersion>(
            "SELECT * FROM file_versions WHERE file_id = ? ORDER BY version_number DESC LIMIT 1",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find latest version", e))
    }

    /// Number of versions, across all files, that point at `blob_handle`.
    pub async fn blob_ref_count(&self, blob_handle: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM file_versions WHERE blob_handle = ?")
            .bind(blob_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count blob references", e)
            })
    }
}
