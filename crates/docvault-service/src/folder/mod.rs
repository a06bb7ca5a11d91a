//! Folder tree services.

pub mod service;

pub use service::FolderService;
