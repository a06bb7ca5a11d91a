//! Custom Axum extractors.
//!
//! The wrappers here replace axum's own rejections with [`ApiError`]
//! validation responses, so malformed input gets the same body shape as any
//! other failure.
//!
//! [`ApiError`]: crate::error::ApiError

pub mod auth;
pub mod credentials;
pub mod json;
pub mod path;
pub mod query;

pub use auth::AuthUser;
pub use credentials::Credentials;
pub use json::{ApiJson, ValidatedJson};
pub use path::ApiPath;
pub use query::ApiQuery;
