//! Per-request caller identity.

use plumeria_commons::{AccessRank, User};

/// The current caller: identity, access rank and confirmation status.
///
/// Built fresh for every request by the (external) authentication layer
/// and owned by that single dispatcher invocation; never persisted.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    /// Context of an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context of an authenticated user.
    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Effective access rank; anonymous callers rank lowest.
    pub fn rank(&self) -> AccessRank {
        self.user.as_ref().map(|u| u.rank).unwrap_or(AccessRank::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_confirmed_email(&self) -> bool {
        self.user.as_ref().is_some_and(User::has_confirmed_email)
    }

    /// Display representation of the actor for audit entries.
    pub fn actor_name(&self) -> String {
        match &self.user {
            Some(user) => user.name.to_string(),
            None => "anonymous user".to_string(),
        }
    }
}
