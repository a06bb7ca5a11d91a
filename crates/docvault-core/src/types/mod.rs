//! Core type definitions used across the DocVault workspace.

pub mod search;

pub use search::{ContentTypeMatch, FileSearchFilter, escape_like, unix_nanos};
