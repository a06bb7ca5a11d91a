//! Share grants.

pub mod access_type;
pub mod model;

pub use access_type::AccessType;
pub use model::{CreatePermission, GrantTarget, Permission};
