//! User entity.

use super::{AccessRank, UserId, UserName};
use serde::{Deserialize, Serialize};

/// A registered account (or the row being created for one).
///
/// `password_hash` is a bcrypt hash string, salt included; the raw
/// password never leaves the auth layer. At most one of
/// `confirmed_email` / `unconfirmed_email` holds a value per registration
/// event: the confirmation flow moves an address from unconfirmed to
/// confirmed, it never duplicates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: UserName,
    pub password_hash: String,
    pub rank: AccessRank,
    pub confirmed_email: Option<String>,
    pub unconfirmed_email: Option<String>,
    /// Unix timestamp in milliseconds.
    pub created_at: i64,
    /// Unix timestamp in milliseconds.
    pub updated_at: i64,
}

impl User {
    /// True when the account has a confirmed e-mail address.
    pub fn has_confirmed_email(&self) -> bool {
        self.confirmed_email.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: UserId::new("u_1"),
            name: UserName::new("dummy"),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            rank: AccessRank::Registered,
            confirmed_email: None,
            unconfirmed_email: Some("godzilla@whitestar.gov".to_string()),
            created_at: 1730000000000,
            updated_at: 1730000000000,
        }
    }

    #[test]
    fn test_confirmed_email_flag() {
        let mut user = sample_user();
        assert!(!user.has_confirmed_email());
        user.confirmed_email = Some("godzilla@whitestar.gov".to_string());
        user.unconfirmed_email = None;
        assert!(user.has_confirmed_email());
    }

    #[test]
    fn test_serde_round_trip() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
