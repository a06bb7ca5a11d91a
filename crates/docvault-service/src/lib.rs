//! # docvault-service
//!
//! Business logic service layer for DocVault. Each service orchestrates
//! repositories, the blob store, and access control to implement one group
//! of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;
pub mod folder;
pub mod metadata;
pub mod share;
pub mod user;

pub use context::RequestContext;
pub use file::{
    BlobJanitor, Download, DownloadService, FileService, ListedFile, SearchService, UploadRequest,
    UploadService, VersionService,
};
pub use folder::FolderService;
pub use metadata::MetadataService;
pub use share::ShareService;
pub use user::{RegisterRequest, UserService};

#[cfg(test)]
pub(crate) mod test_support;
