//! # docvault-storage
//!
//! Blob store implementations for DocVault. File bytes are stored once per
//! distinct content, keyed by their SHA-256 digest.

pub mod providers;

pub use providers::LocalBlobStore;
