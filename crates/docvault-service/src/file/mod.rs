//! File services: upload, download, versions, search, listing, delete.

pub mod blobs;
pub mod download;
pub mod search;
pub mod service;
pub mod upload;
pub mod version;

pub use blobs::BlobJanitor;
pub use download::{Download, DownloadService};
pub use search::SearchService;
pub use service::{FileService, ListedFile};
pub use upload::{UploadRequest, UploadService};
pub use version::VersionService;
