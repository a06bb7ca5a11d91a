//! Blob lifetime management.
//!
//! Blobs are shared between versions with identical content, so one may only
//! be removed once no version references it. Uploads hold the shared side of
//! `gate` from `put` until their commit finishes; collection holds the
//! exclusive side, so it never removes a blob an upload is about to record.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, warn};

use docvault_core::result::AppResult;
use docvault_core::traits::{BlobPut, BlobStore};
use docvault_database::repositories::VersionRepository;

/// Stores blobs for uploads and removes unreferenced ones.
#[derive(Debug, Clone)]
pub struct BlobJanitor {
    /// Backing blob store.
    store: Arc<dyn BlobStore>,
    /// Version ledger, for reference counts.
    versions: Arc<VersionRepository>,
    /// Upload/collection exclusion.
    gate: Arc<RwLock<()>>,
}

impl BlobJanitor {
    /// Creates a new janitor over the given store.
    pub fn new(store: Arc<dyn BlobStore>, versions: Arc<VersionRepository>) -> Self {
        Self {
            store,
            versions,
            gate: Arc::new(RwLock::new(())),
        }
    }

    /// The underlying blob store.
    pub fn store(&self) -> &Arc<dyn BlobStore> {
        &self.store
    }

    /// Held by an upload from storing its blob until its commit resolves.
    pub async fn upload_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Store bytes. Call with an [`upload_guard`](Self::upload_guard) held.
    pub async fn put(&self, data: Bytes) -> AppResult<BlobPut> {
        self.store.put(data).await
    }

    /// Remove every handle no version references any more.
    ///
    /// Failures are logged and swallowed: a leftover blob wastes space but
    /// never breaks a read.
    pub async fn collect(&self, handles: &[String]) {
        if handles.is_empty() {
            return;
        }
        let _exclusive = self.gate.write().await;

        for handle in handles {
            match self.versions.blob_ref_count(handle).await {
                Ok(0) => match self.store.delete(handle).await {
                    Ok(()) => debug!(handle = %handle, "Removed unreferenced blob"),
                    Err(e) => warn!(handle = %handle, error = %e, "Failed to remove blob"),
                },
                Ok(_) => {}
                Err(e) => warn!(handle = %handle, error = %e, "Failed to count blob references"),
            }
        }
    }
}
