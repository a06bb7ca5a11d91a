//! Share grant creation and listing.
//!
//! Only an owner may share. A non-owner asking to share gets the same
//! not-found answer as for a missing resource.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_database::repositories::{
    FileRepository, FolderRepository, GrantWithUser, PermissionRepository, UserRepository,
};
use docvault_entity::permission::{AccessType, CreatePermission, GrantTarget, Permission};
use docvault_entity::user::User;

use crate::context::RequestContext;

/// Creates and lists share grants.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share grant repository.
    permission_repo: Arc<PermissionRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// User repository, for grantee lookup.
    user_repo: Arc<UserRepository>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        permission_repo: Arc<PermissionRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            permission_repo,
            file_repo,
            folder_repo,
            user_repo,
        }
    }

    /// Gives `grantee_username` read access to one of the caller's files.
    pub async fn share_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        grantee_username: &str,
        access_type: AccessType,
    ) -> Result<Permission, AppError> {
        let grantee = self.resolve_grantee(ctx, grantee_username).await?;
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|file| file.is_owned_by(ctx.user_id))
            .ok_or_else(AppError::file_not_found)?;

        let grant = self
            .permission_repo
            .create(&CreatePermission {
                grantee_id: grantee.id,
                target: GrantTarget::File(file.id),
                access_type,
                granted_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            grantee_id = %grantee.id,
            access_type = %access_type,
            "File shared"
        );
        Ok(grant)
    }

    /// Gives `grantee_username` read access to every file in one of the
    /// caller's folders, including files added later.
    pub async fn share_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        grantee_username: &str,
        access_type: AccessType,
    ) -> Result<Permission, AppError> {
        let grantee = self.resolve_grantee(ctx, grantee_username).await?;
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|folder| folder.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        let grant = self
            .permission_repo
            .create(&CreatePermission {
                grantee_id: grantee.id,
                target: GrantTarget::Folder(folder.id),
                access_type,
                granted_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            grantee_id = %grantee.id,
            access_type = %access_type,
            "Folder shared"
        );
        Ok(grant)
    }

    /// Grants made directly on one of the caller's files.
    pub async fn list_file_grants(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
    ) -> Result<Vec<GrantWithUser>, AppError> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|file| file.is_owned_by(ctx.user_id))
            .ok_or_else(AppError::file_not_found)?;
        self.permission_repo.list_for_file(file.id).await
    }

    async fn resolve_grantee(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<User, AppError> {
        let grantee = self
            .user_repo
            .find_by_username(username.trim())
            .await?
            .ok_or_else(AppError::user_not_found)?;
        if grantee.id == ctx.user_id {
            return Err(AppError::validation("Cannot share with yourself"));
        }
        Ok(grantee)
    }
}
