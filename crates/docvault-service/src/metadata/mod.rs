//! Per-file key/value metadata.

pub mod service;

pub use service::MetadataService;
