//! File search over everything the caller can read.

use std::sync::Arc;

use tracing::debug;

use docvault_core::error::AppError;
use docvault_core::types::FileSearchFilter;
use docvault_database::repositories::FileRepository;
use docvault_entity::file::File;

use crate::context::RequestContext;

/// Filters the caller's owned and shared files.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// File repository.
    file_repo: Arc<FileRepository>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(file_repo: Arc<FileRepository>) -> Self {
        Self { file_repo }
    }

    /// Returns matching files ordered by creation time. No match is an empty
    /// list, not an error.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: &FileSearchFilter,
    ) -> Result<Vec<File>, AppError> {
        let files = self.file_repo.search(ctx.user_id, filter).await?;
        debug!(user_id = %ctx.user_id, ?filter, results = files.len(), "File search");
        Ok(files)
    }
}
