// Type-safe wrapper for tag names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for tag names.
///
/// Canonical tag names are unique; after a merge the source name lives on
/// as an alias of the target tag. Comparisons are case-insensitive via
/// `to_lowercase`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagName(String);

impl TagName {
    /// Creates a new TagName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tag name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Canonical form for case-insensitive comparisons.
    pub fn to_lowercase(&self) -> TagName {
        TagName(self.0.to_lowercase())
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TagName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TagName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
