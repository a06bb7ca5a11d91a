//! # docvault-auth
//!
//! Authentication and authorization for DocVault.
//!
//! ## Modules
//!
//! - `jwt`: bearer token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `acl`: read/write decisions combining ownership and share grants

pub mod acl;
pub mod jwt;
pub mod password;

pub use acl::AccessChecker;
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
