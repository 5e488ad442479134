//! Typed identifier wrappers.
//!
//! Each identifier is a newtype over `String` with a `StorageKey` impl so
//! stores index entities without raw strings changing hands.

use crate::storage_key::StorageKey;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl StorageKey for $name {
            fn storage_key(&self) -> Vec<u8> {
                self.0.as_bytes().to_vec()
            }

            fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
                String::from_utf8(bytes.to_vec())
                    .map($name)
                    .map_err(|e| e.to_string())
            }
        }
    };
}

define_id!(
    /// Unique user identifier (e.g. "u_42").
    UserId
);
define_id!(
    /// Unique tag identifier (e.g. "t_7").
    TagId
);
define_id!(
    /// Unique post identifier (e.g. "p_1093").
    PostId
);
define_id!(
    /// Unique audit log entry identifier; zero-padded so byte order is
    /// append order.
    AuditLogId
);
