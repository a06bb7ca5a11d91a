//! Share grant repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::permission::{CreatePermission, Permission};

/// A grant joined with the grantee's username, for listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GrantWithUser {
    /// The grant row.
    #[sqlx(flatten)]
    pub permission: Permission,
    /// Username of the grantee.
    pub grantee_username: String,
}

/// Repository for share grants.
#[derive(Debug, Clone)]
pub struct PermissionRepository {
    pool: SqlitePool,
}

impl PermissionRepository {
    /// Create a new permission repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a grant. Duplicate grants for the same pair are allowed.
    pub async fn create(&self, data: &CreatePermission) -> AppResult<Permission> {
        let (file_id, folder_id) = data.columns();
        sqlx::query_as::<_, Permission>(
            "INSERT INTO permissions \
             (id, grantee_id, file_id, folder_id, access_type, granted_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.grantee_id)
        .bind(file_id)
        .bind(folder_id)
        .bind(data.access_type)
        .bind(data.granted_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create permission", e))
    }

    /// Whether `user_id` holds any grant on `file_id`, or on `folder_id`
    /// when given.
    pub async fn has_grant(
        &self,
        user_id: Uuid,
        file_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM permissions WHERE grantee_id = ?1 \
             AND (file_id = ?2 OR (?3 IS NOT NULL AND folder_id = ?3)))",
        )
        .bind(user_id)
        .bind(file_id)
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check permission", e))
    }

    /// Grants made directly on a file, oldest first, with grantee names.
    pub async fn list_for_file(&self, file_id: Uuid) -> AppResult<Vec<GrantWithUser>> {
        sqlx::query_as::<_, GrantWithUser>(
            "SELECT p.*, u.username AS grantee_username FROM permissions p \
             JOIN users u ON u.id = p.grantee_id \
             WHERE p.file_id = ? ORDER BY p.created_at ASC",
        )
        .bind(file_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permissions", e))
    }
}
