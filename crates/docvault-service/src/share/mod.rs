//! File and folder sharing.

pub mod service;

pub use service::ShareService;
