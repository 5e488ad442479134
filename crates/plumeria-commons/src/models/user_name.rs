// Type-safe wrapper for user names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for user names.
///
/// User names are unique case-insensitively; `to_lowercase` produces the
/// canonical comparison form used by the uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Creates a new UserName from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the user name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner String.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Canonical form for case-insensitive comparisons.
    pub fn to_lowercase(&self) -> UserName {
        UserName(self.0.to_lowercase())
    }

    /// True when the name carries no usable characters.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
