//! Users provider.
//!
//! User names are unique case-insensitively; confirmed e-mail addresses
//! are unique case-insensitively; unconfirmed addresses may be shared
//! (the confirmation race is resolved by the confirmation flow, not at
//! creation time). `create` enforces both invariants before inserting.

use crate::partitions::USERS;
use plumeria_commons::{ApiError, ApiResult, User, UserId, UserName};
use plumeria_store::{entity, sequences, StoreTransaction};

/// Model operations on users.
pub struct UsersProvider;

impl UsersProvider {
    /// Reads a user by id.
    pub fn get(tx: &dyn StoreTransaction, user_id: &UserId) -> ApiResult<Option<User>> {
        Ok(entity::get(tx, &USERS, user_id)?)
    }

    /// Finds a user by name, case-insensitively.
    pub fn find_by_name(tx: &dyn StoreTransaction, name: &UserName) -> ApiResult<Option<User>> {
        let wanted = name.to_lowercase();
        let users: Vec<User> = entity::scan(tx, &USERS)?;
        Ok(users.into_iter().find(|u| u.name.to_lowercase() == wanted))
    }

    /// Finds the user holding `email` as a confirmed address,
    /// case-insensitively.
    pub fn find_by_confirmed_email(
        tx: &dyn StoreTransaction,
        email: &str,
    ) -> ApiResult<Option<User>> {
        let wanted = email.to_lowercase();
        let users: Vec<User> = entity::scan(tx, &USERS)?;
        Ok(users.into_iter().find(|u| {
            u.confirmed_email
                .as_deref()
                .is_some_and(|e| e.to_lowercase() == wanted)
        }))
    }

    /// Number of users in the system.
    pub fn count(tx: &dyn StoreTransaction) -> ApiResult<usize> {
        Ok(tx.scan_all(&USERS)?.len())
    }

    /// Allocates the next user id within the transaction.
    pub fn next_id(tx: &mut dyn StoreTransaction) -> ApiResult<UserId> {
        let n = sequences::next(tx, "users")?;
        Ok(UserId::new(format!("u_{}", n)))
    }

    /// Inserts a new user, enforcing the uniqueness invariants.
    pub fn create(tx: &mut dyn StoreTransaction, user: &User) -> ApiResult<()> {
        if Self::find_by_name(tx, &user.name)?.is_some() {
            return Err(ApiError::DuplicateName(user.name.to_string()));
        }
        if let Some(email) = user.confirmed_email.as_deref() {
            if Self::find_by_confirmed_email(tx, email)?.is_some() {
                return Err(ApiError::DuplicateEmail(email.to_string()));
            }
        }
        entity::put(tx, &USERS, &user.user_id, user)?;
        log::debug!("created user {} ({})", user.name, user.user_id);
        Ok(())
    }

    /// Updates an existing user.
    pub fn save(tx: &mut dyn StoreTransaction, user: &User) -> ApiResult<()> {
        if Self::get(tx, &user.user_id)?.is_none() {
            return Err(ApiError::not_found(format!(
                "User '{}' not found",
                user.name
            )));
        }
        entity::put(tx, &USERS, &user.user_id, user)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plumeria_commons::AccessRank;
    use plumeria_store::{MemoryBackend, StorageBackend};

    fn user(id: &str, name: &str, confirmed_email: Option<&str>) -> User {
        User {
            user_id: UserId::new(id),
            name: UserName::new(name),
            password_hash: "$2b$12$hash".to_string(),
            rank: AccessRank::Registered,
            confirmed_email: confirmed_email.map(str::to_string),
            unconfirmed_email: None,
            created_at: 1730000000000,
            updated_at: 1730000000000,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_case_insensitive() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        UsersProvider::create(tx.as_mut(), &user("u_1", "Dummy", None)).unwrap();

        let found = UsersProvider::find_by_name(tx.as_ref(), &UserName::new("dummy")).unwrap();
        assert_eq!(found.unwrap().user_id.as_str(), "u_1");
        assert_eq!(UsersProvider::count(tx.as_ref()).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        UsersProvider::create(tx.as_mut(), &user("u_1", "dummy", None)).unwrap();
        let err = UsersProvider::create(tx.as_mut(), &user("u_2", "DUMMY", None)).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_confirmed_email_uniqueness() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        UsersProvider::create(tx.as_mut(), &user("u_1", "a", Some("x@example.com"))).unwrap();
        let err = UsersProvider::create(tx.as_mut(), &user("u_2", "b", Some("X@Example.com")))
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_unconfirmed_emails_may_collide() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        let mut first = user("u_1", "a", None);
        first.unconfirmed_email = Some("x@example.com".to_string());
        let mut second = user("u_2", "b", None);
        second.unconfirmed_email = Some("x@example.com".to_string());

        UsersProvider::create(tx.as_mut(), &first).unwrap();
        UsersProvider::create(tx.as_mut(), &second).unwrap();
        assert_eq!(UsersProvider::count(tx.as_ref()).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_requires_existing_user() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        let err = UsersProvider::save(tx.as_mut(), &user("u_9", "ghost", None)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_next_id_is_sequential() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        assert_eq!(UsersProvider::next_id(tx.as_mut()).unwrap().as_str(), "u_1");
        assert_eq!(UsersProvider::next_id(tx.as_mut()).unwrap().as_str(), "u_2");
    }
}
