//! Route handlers organized by domain.

pub mod auth;
pub mod file;
pub mod folder;
pub mod health;
pub mod metadata;
pub mod search;
pub mod share;
pub mod version;
