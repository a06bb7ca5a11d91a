//! File domain entities.

pub mod metadata;
pub mod model;
pub mod version;

pub use metadata::FileMetadata;
pub use model::{File, NewUpload};
pub use version::FileVersion;
