//! Global access rank of a caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered global privilege level of a user.
///
/// Privilege strictly increases with rank; the derived `Ord` follows the
/// declaration order. Anonymous is the rank of an unauthenticated caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AccessRank {
    Anonymous,
    Registered,
    PowerUser,
    Moderator,
    Admin,
}

impl AccessRank {
    /// All ranks in ascending privilege order.
    pub const ALL: [AccessRank; 5] = [
        AccessRank::Anonymous,
        AccessRank::Registered,
        AccessRank::PowerUser,
        AccessRank::Moderator,
        AccessRank::Admin,
    ];

    /// Wire name of the rank, as used in configuration and arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessRank::Anonymous => "anonymous",
            AccessRank::Registered => "registered",
            AccessRank::PowerUser => "power-user",
            AccessRank::Moderator => "moderator",
            AccessRank::Admin => "admin",
        }
    }

    /// Parses a wire name into a rank.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == name)
    }
}

impl fmt::Display for AccessRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown access rank '{}'", s))
    }
}
