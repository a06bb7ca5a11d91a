//! Core traits defined in `docvault-core` and implemented by other crates.

pub mod blob;

pub use blob::{BlobPut, BlobStore};
