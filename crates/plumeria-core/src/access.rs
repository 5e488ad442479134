//! Access model: named privileges resolved to rank thresholds.
//!
//! A privilege is a name; configuration maps it to either a minimum
//! access rank or one of the policy selectors `nobody` / `anonymous`.
//! Selectors are parsed once into [`RankThreshold`]; job logic never
//! string-matches configuration values.

use plumeria_auth::AuthContext;
use plumeria_commons::{AccessRank, ApiError, ApiResult};
use plumeria_configs::ServerConfig;
use std::fmt;

/// Privilege name constants.
pub mod names {
    pub const REGISTER_ACCOUNT: &str = "registerAccount";
    pub const MERGE_TAGS: &str = "mergeTags";
    pub const EDIT_USER_EMAIL_NO_CONFIRM: &str = "editUserEmailNoConfirm";
}

/// A named permission, optionally scoped by a sub-privilege context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Privilege(String);

impl Privilege {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn register_account() -> Self {
        Self::new(names::REGISTER_ACCOUNT)
    }

    pub fn merge_tags() -> Self {
        Self::new(names::MERGE_TAGS)
    }

    pub fn edit_user_email_no_confirm() -> Self {
        Self::new(names::EDIT_USER_EMAIL_NO_CONFIRM)
    }

    /// Scopes the privilege by a resource context, forming the
    /// `"name:context"` key the configuration table uses for
    /// sub-privileges.
    pub fn sub(&self, context: &str) -> Privilege {
        Privilege(format!("{}:{}", self.0, context))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved minimum-rank policy for a privilege.
///
/// `Nobody` and `Anonymous` are policy selectors, not ranks: they mean
/// "no one passes" and "even anonymous passes" respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankThreshold {
    /// Callers at or above this rank pass.
    Rank(AccessRank),
    /// No one passes.
    Nobody,
    /// Everyone passes, including anonymous callers.
    Anonymous,
}

impl RankThreshold {
    /// Parses a configuration value into a threshold.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nobody" => Some(RankThreshold::Nobody),
            "anonymous" => Some(RankThreshold::Anonymous),
            other => AccessRank::from_name(other).map(RankThreshold::Rank),
        }
    }

    /// Whether a caller of the given rank passes this threshold.
    pub fn allows(&self, rank: AccessRank) -> bool {
        match self {
            RankThreshold::Nobody => false,
            RankThreshold::Anonymous => true,
            RankThreshold::Rank(min) => rank >= *min,
        }
    }
}

/// Resolves a privilege to its configured threshold.
///
/// Unset or unparsable privilege values resolve to the most restrictive
/// threshold.
pub fn resolve_threshold(config: &ServerConfig, privilege: &Privilege) -> RankThreshold {
    match config.privileges.get(privilege.name()) {
        Some(value) => RankThreshold::parse(value).unwrap_or_else(|| {
            log::warn!(
                "privilege '{}' has invalid value '{}', treating as nobody",
                privilege,
                value
            );
            RankThreshold::Nobody
        }),
        None => RankThreshold::Nobody,
    }
}

/// Fails with `InsufficientPrivilege` unless the caller passes the
/// privilege's resolved threshold.
pub fn assert_privilege(
    config: &ServerConfig,
    auth: &AuthContext,
    privilege: &Privilege,
) -> ApiResult<()> {
    if resolve_threshold(config, privilege).allows(auth.rank()) {
        Ok(())
    } else {
        Err(ApiError::InsufficientPrivilege(privilege.name().to_string()))
    }
}
