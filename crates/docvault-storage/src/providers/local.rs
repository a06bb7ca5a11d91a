//! Local filesystem blob store.
//!
//! Blobs live at `<root>/<hash[0..2]>/<hash>` where `hash` is the lowercase
//! hex SHA-256 of the content. The hash doubles as the handle.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::{BlobPut, BlobStore};

/// Content-addressed blob store on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at the given path, creating it if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Hex SHA-256 of `data`.
    pub fn content_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Resolve a handle to its path, rejecting anything that is not a
    /// SHA-256 hex digest.
    fn resolve(&self, handle: &str) -> Option<PathBuf> {
        let valid = handle.len() == 64
            && handle
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| self.root.join(&handle[..2]).join(handle))
    }

    fn resolve_existing(&self, handle: &str) -> AppResult<PathBuf> {
        self.resolve(handle)
            .ok_or_else(|| AppError::blob_missing(handle))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn put(&self, data: Bytes) -> AppResult<BlobPut> {
        let hash = Self::content_hash(&data);
        let path = self.resolve_existing(&hash)?;
        let size = data.len() as u64;

        if fs::try_exists(&path).await.unwrap_or(false) {
            debug!(handle = %hash, bytes = size, "Blob already stored");
            return Ok(BlobPut {
                handle: hash.clone(),
                content_hash: hash,
                size,
                created: false,
            });
        }

        let dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.root.clone());
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob directory: {}", dir.display()),
                e,
            )
        })?;

        // Readers only ever see complete blobs: write aside, then rename.
        let tmp = dir.join(format!(".{hash}.{}.tmp", Uuid::new_v4()));
        let written = async {
            let mut file = fs::File::create(&tmp).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
            fs::rename(&tmp, &path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob {hash}"),
                e,
            ));
        }

        debug!(handle = %hash, bytes = size, "Stored blob");
        Ok(BlobPut {
            handle: hash.clone(),
            content_hash: hash,
            size,
            created: true,
        })
    }

    async fn get(&self, handle: &str) -> AppResult<Bytes> {
        let path = self.resolve_existing(handle)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::blob_missing(handle)
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read blob {handle}"),
                    e,
                )
            }
        })?;
        debug!(handle, bytes = data.len(), "Read blob");
        Ok(Bytes::from(data))
    }

    async fn delete(&self, handle: &str) -> AppResult<()> {
        let Some(path) = self.resolve(handle) else {
            return Ok(());
        };
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(handle, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob {handle}"),
                e,
            )),
        }
    }

    async fn exists(&self, handle: &str) -> AppResult<bool> {
        match self.resolve(handle) {
            Some(path) => fs::try_exists(&path).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to stat blob", e)
            }),
            None => Ok(false),
        }
    }
}
