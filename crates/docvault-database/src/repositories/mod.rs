//! Repository implementations for all DocVault entities.

pub mod file;
pub mod folder;
pub mod metadata;
pub mod permission;
pub mod user;
pub mod version;

pub use file::FileRepository;
pub use folder::FolderRepository;
pub use metadata::MetadataRepository;
pub use permission::{GrantWithUser, PermissionRepository};
pub use user::UserRepository;
pub use version::VersionRepository;

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Whether a database error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Whether a database error means another writer held the lock.
pub(crate) fn is_busy(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}
