//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Directory holding content-addressed blobs.
    #[serde(default = "default_blob_root")]
    pub blob_root: String,
    /// Maximum request body size in bytes (base64 payload included).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            blob_root: default_blob_root(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_blob_root() -> String {
    "./data/blobs".to_string()
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}
