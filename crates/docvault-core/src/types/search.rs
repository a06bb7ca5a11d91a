//! File search filter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` wildcards so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Unix nanoseconds for `ts`, saturating outside the representable range
/// (roughly years 1677 to 2262).
pub fn unix_nanos(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_nanos_opt()
        .unwrap_or(if ts.timestamp() < 0 { i64::MIN } else { i64::MAX })
}

/// Filters for a file search. All present filters are AND-ed; absent
/// filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSearchFilter {
    /// Case-insensitive substring of the file name.
    pub keyword: Option<String>,
    /// Exact content type, or a family such as `image/*` or `text/`.
    pub content_type: Option<String>,
    /// Inclusive lower bound on creation time.
    pub created_after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time.
    pub created_before: Option<DateTime<Utc>>,
}

/// How a content-type filter is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypeMatch {
    /// The stored type must equal this value.
    Exact(String),
    /// The stored type must start with this value.
    Prefix(String),
}

impl FileSearchFilter {
    /// Returns the `LIKE` pattern for the keyword, lowercased and escaped.
    ///
    /// Blank keywords are treated as absent.
    pub fn keyword_pattern(&self) -> Option<String> {
        let keyword = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(format!("%{}%", escape_like(&keyword.to_lowercase())))
    }

    /// Returns how the content-type filter should be matched.
    pub fn content_type_match(&self) -> Option<ContentTypeMatch> {
        let value = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())?
            .to_lowercase();

        if let Some(family) = value.strip_suffix('*') {
            Some(ContentTypeMatch::Prefix(family.to_string()))
        } else if value.ends_with('/') {
            Some(ContentTypeMatch::Prefix(value))
        } else {
            Some(ContentTypeMatch::Exact(value))
        }
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.keyword_pattern().is_none()
            && self.content_type_match().is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
    }
}
