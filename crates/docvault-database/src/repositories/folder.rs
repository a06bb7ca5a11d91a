//! Folder repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::folder::{CreateFolder, Folder};

/// Repository for folder lookups and find-or-create.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find an owner's folder by name.
    pub async fn find_by_owner_and_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE owner_id = ? AND name = ?")
            .bind(owner_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e)
            })
    }

    /// Return the folder identified by `(owner_id, name)`, creating it if
    /// absent. The boolean is true when this call inserted the row.
    ///
    /// An existing folder keeps its original parent.
    pub async fn find_or_create(&self, data: &CreateFolder) -> AppResult<(Folder, bool)> {
        let now = Utc::now();
        let inserted = sqlx::query(
            "INSERT INTO folders (id, owner_id, name, parent_folder_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) ON CONFLICT(owner_id, name) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(data.parent_folder_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))?
        .rows_affected()
            > 0;

        let folder = self
            .find_by_owner_and_name(data.owner_id, &data.name)
            .await?
            .ok_or_else(|| AppError::internal("Folder vanished after find-or-create"))?;
        Ok((folder, inserted))
    }

    /// Find-or-create a top-level folder on an open transaction, returning
    /// its ID.
    pub async fn upsert_top_level(
        conn: &mut SqliteConnection,
        owner_id: Uuid,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query(
            "INSERT INTO folders (id, owner_id, name, parent_folder_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, NULL, ?4, ?4) ON CONFLICT(owner_id, name) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(name)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        sqlx::query_scalar("SELECT id FROM folders WHERE owner_id = ? AND name = ?")
            .bind(owner_id)
            .bind(name)
            .fetch_one(&mut *conn)
            .await
    }

    /// List all folders of an owner, ordered by name.
    pub async fn list_for_owner(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE owner_id = ? ORDER BY name ASC")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }
}
