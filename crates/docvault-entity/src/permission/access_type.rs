//! Access type recorded on a share grant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of access a grant was created with.
///
/// Any grant confers read access to its grantee; the type is recorded and
/// reported but writes stay owner-only regardless of it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Granted individually, not advertised.
    Private,
    /// Marked as publicly shared.
    Public,
    /// Ordinary share.
    #[default]
    Shared,
}

impl AccessType {
    /// Return the access type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::Shared => "shared",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccessType {
    type Err = docvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            "shared" => Ok(Self::Shared),
            _ => Err(docvault_core::AppError::validation(format!(
                "Invalid access type: '{s}'. Expected one of: private, public, shared"
            ))),
        }
    }
}
