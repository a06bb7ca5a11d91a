//! Account services.

pub mod service;

pub use service::{RegisterRequest, UserService};
