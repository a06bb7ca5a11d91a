//! File repository implementation.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::types::{ContentTypeMatch, FileSearchFilter, escape_like, unix_nanos};
use docvault_entity::file::{File, FileVersion, NewUpload};

use super::folder::FolderRepository;
use super::version::VersionRepository;
use super::{is_busy, is_unique_violation};

/// How many times an upload commit is attempted before giving up.
pub const MAX_COMMIT_ATTEMPTS: u32 = 5;

/// Repository for the file registry.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Find an owner's file by name.
    pub async fn find_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE owner_id = ? AND name = ?")
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find file by name", e)
            })
    }

    /// Record an upload: resolve the folder, create or reuse the file row,
    /// append a version and point the file at it, all in one transaction.
    ///
    /// Lock contention and version-number collisions are retried up to
    /// [`MAX_COMMIT_ATTEMPTS`] times.
    pub async fn commit_upload(&self, upload: &NewUpload) -> AppResult<(File, FileVersion)> {
        let mut attempt = 1;
        loop {
            match self.try_commit_upload(upload).await {
                Ok(committed) => return Ok(committed),
                Err(e)
                    if attempt < MAX_COMMIT_ATTEMPTS
                        && (is_unique_violation(&e) || is_busy(&e)) =>
                {
                    warn!(
                        owner_id = %upload.owner_id,
                        name = %upload.name,
                        attempt,
                        error = %e,
                        "Upload commit conflicted, retrying"
                    );
                    attempt += 1;
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Database,
                        "Failed to commit upload",
                        e,
                    ));
                }
            }
        }
    }

    async fn try_commit_upload(
        &self,
        upload: &NewUpload,
    ) -> Result<(File, FileVersion), sqlx::Error> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Writing first takes the database write lock for the whole transaction.
        let folder_id = match upload.folder_name.as_deref() {
            Some(name) => Some(
                FolderRepository::upsert_top_level(&mut *tx, upload.owner_id, name, now).await?,
            ),
            None => None,
        };

        let file = sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (id, owner_id, name, name_folded, folder_id, size_bytes, content_type, current_version, \
              created_at, created_at_ns, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, 0, ?7, ?8, ?7) \
             ON CONFLICT(owner_id, name) DO UPDATE SET \
             folder_id = COALESCE(excluded.folder_id, files.folder_id), \
             updated_at = excluded.updated_at \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(upload.owner_id)
        .bind(&upload.name)
        .bind(upload.name.to_lowercase())
        .bind(folder_id)
        .bind(&upload.content_type)
        .bind(now)
        .bind(unix_nanos(now))
        .fetch_one(&mut *tx)
        .await?;

        let version = VersionRepository::append(&mut *tx, file.id, upload).await?;

        let file = sqlx::query_as::<_, File>(
            "UPDATE files SET current_version = ?2, size_bytes = ?3, content_type = ?4, updated_at = ?5 \
             WHERE id = ?1 RETURNING *",
        )
        .bind(file.id)
        .bind(version.version_number)
        .bind(version.size_bytes)
        .bind(&upload.content_type)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((file, version))
    }

    /// Point a file at an existing version and take that version's size.
    ///
    /// Returns `None` when the file has no such version. The ledger itself
    /// is not touched.
    pub async fn rollback(&self, file_id: Uuid, version_number: i64) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET current_version = ?2, \
             size_bytes = (SELECT size_bytes FROM file_versions WHERE file_id = ?1 AND version_number = ?2), \
             updated_at = ?3 \
             WHERE id = ?1 AND EXISTS \
             (SELECT 1 FROM file_versions WHERE file_id = ?1 AND version_number = ?2) \
             RETURNING *",
        )
        .bind(file_id)
        .bind(version_number)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to roll back file", e))
    }

    /// Delete a file. Versions, grants and metadata cascade.
    ///
    /// Returns the blob handles its versions referenced, or `None` if the
    /// file did not exist.
    pub async fn delete(&self, file_id: Uuid) -> AppResult<Option<Vec<String>>> {
        let map_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to delete file", e);
        let mut tx = self.pool.begin().await.map_err(map_err)?;

        let handles = VersionRepository::handles_for_file(&mut *tx, file_id)
            .await
            .map_err(map_err)?;
        let deleted = sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(file_id)
            .execute(&mut *tx)
            .await
            .map_err(map_err)?
            .rows_affected();

        if deleted == 0 {
            return Ok(None);
        }
        tx.commit().await.map_err(map_err)?;
        Ok(Some(handles))
    }

    /// All files owned by a user, ordered by name.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE owner_id = ? ORDER BY name ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Files owned by others that the user holds a grant on.
    pub async fn list_shared_with(&self, user_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT f.* FROM files f WHERE f.owner_id <> ?1 AND EXISTS (\
             SELECT 1 FROM permissions p WHERE p.grantee_id = ?1 \
             AND (p.file_id = f.id OR (f.folder_id IS NOT NULL AND p.folder_id = f.folder_id))) \
             ORDER BY f.name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shared files", e))
    }

    /// Search the files a user can read. Filters are AND-ed.
    pub async fn search(&self, user_id: Uuid, filter: &FileSearchFilter) -> AppResult<Vec<File>> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT f.* FROM files f WHERE ");
        push_visible_to(&mut qb, user_id);

        if let Some(pattern) = filter.keyword_pattern() {
            qb.push(" AND f.name_folded LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\'");
        }
        match filter.content_type_match() {
            Some(ContentTypeMatch::Exact(value)) => {
                qb.push(" AND lower(f.content_type) = ").push_bind(value);
            }
            Some(ContentTypeMatch::Prefix(prefix)) => {
                qb.push(" AND lower(f.content_type) LIKE ")
                    .push_bind(format!("{}%", escape_like(&prefix)))
                    .push(" ESCAPE '\\'");
            }
            None => {}
        }
        if let Some(after) = filter.created_after {
            qb.push(" AND f.created_at_ns >= ").push_bind(unix_nanos(after));
        }
        if let Some(before) = filter.created_before {
            qb.push(" AND f.created_at_ns <= ").push_bind(unix_nanos(before));
        }
        qb.push(" ORDER BY f.created_at_ns ASC, f.name ASC");

        qb.build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }
}

/// Restricts to files `user_id` may read: owned, granted directly, or
/// granted through the containing folder.
fn push_visible_to(qb: &mut QueryBuilder<'_, Sqlite>, user_id: Uuid) {
    qb.push("(f.owner_id = ")
        .push_bind(user_id)
        .push(" OR EXISTS (SELECT 1 FROM permissions p WHERE p.grantee_id = ")
        .push_bind(user_id)
        .push(
            " AND (p.file_id = f.id OR (f.folder_id IS NOT NULL AND p.folder_id = f.folder_id))))",
        );
}
