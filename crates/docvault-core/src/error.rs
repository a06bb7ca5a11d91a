//! Unified application error types for DocVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The not-found family is split so that logs can tell a missing file row
/// from a missing version or a missing blob. The HTTP layer collapses all of
/// them into a single 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A generic resource was not found.
    NotFound,
    /// The file does not exist or is not visible to the caller.
    FileNotFound,
    /// The file exists but the requested version does not.
    VersionNotFound,
    /// A version row references a blob that is missing from the blob store.
    BlobMissing,
    /// The named user does not exist.
    UserNotFound,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Input validation failed.
    Validation,
    /// A blob storage I/O error occurred.
    Storage,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind belongs to the not-found family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::FileNotFound
                | Self::VersionNotFound
                | Self::BlobMissing
                | Self::UserNotFound
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            Self::VersionNotFound => write!(f, "VERSION_NOT_FOUND"),
            Self::BlobMissing => write!(f, "BLOB_MISSING"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout DocVault.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a generic not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// The file is absent, or present but not visible to the caller.
    pub fn file_not_found() -> Self {
        Self::new(ErrorKind::FileNotFound, "File not found")
    }

    /// The requested version does not exist for this file.
    pub fn version_not_found(version_number: i64) -> Self {
        Self::new(
            ErrorKind::VersionNotFound,
            format!("Version {version_number} not found"),
        )
    }

    /// The blob behind a version is missing.
    pub fn blob_missing(handle: &str) -> Self {
        Self::new(ErrorKind::BlobMissing, format!("Blob {handle} is missing"))
    }

    /// The named user does not exist.
    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, "User not found")
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this error belongs to the not-found family.
    pub fn is_not_found(&self) -> bool {
        self.kind.is_not_found()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Validation,
            format!("JSON error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
