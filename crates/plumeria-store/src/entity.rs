//! Typed entity access over a transaction.
//!
//! Keys are `StorageKey` newtypes, values are serde entities stored as
//! JSON. Providers build their operations from these helpers instead of
//! touching raw bytes.

use crate::storage_trait::{Partition, Result, StorageError, StoreTransaction};
use plumeria_commons::StorageKey;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads an entity by typed key.
pub fn get<K, V>(tx: &dyn StoreTransaction, partition: &Partition, key: &K) -> Result<Option<V>>
where
    K: StorageKey,
    V: DeserializeOwned,
{
    match tx.get(partition, &key.storage_key())? {
        Some(bytes) => Ok(Some(decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Writes an entity under a typed key.
pub fn put<K, V>(
    tx: &mut dyn StoreTransaction,
    partition: &Partition,
    key: &K,
    entity: &V,
) -> Result<()>
where
    K: StorageKey,
    V: Serialize,
{
    let bytes = serde_json::to_vec(entity)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    tx.put(partition, &key.storage_key(), &bytes)
}

/// Deletes an entity by typed key.
pub fn delete<K>(tx: &mut dyn StoreTransaction, partition: &Partition, key: &K) -> Result<()>
where
    K: StorageKey,
{
    tx.delete(partition, &key.storage_key())
}

/// Returns every entity in the partition, in key order.
pub fn scan<V>(tx: &dyn StoreTransaction, partition: &Partition) -> Result<Vec<V>>
where
    V: DeserializeOwned,
{
    tx.scan_all(partition)?
        .into_iter()
        .map(|(_, bytes)| decode(&bytes))
        .collect()
}

fn decode<V: DeserializeOwned>(bytes: &[u8]) -> Result<V> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::storage_trait::StorageBackend;
    use plumeria_commons::{User, UserId, UserName};

    const USERS: Partition = Partition::new("users");

    fn sample_user(id: &str, name: &str) -> User {
        User {
            user_id: UserId::new(id),
            name: UserName::new(name),
            password_hash: "$2b$12$hash".to_string(),
            rank: plumeria_commons::AccessRank::Registered,
            confirmed_email: None,
            unconfirmed_email: None,
            created_at: 1730000000000,
            updated_at: 1730000000000,
        }
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        let user = sample_user("u_1", "alice");
        put(tx.as_mut(), &USERS, &user.user_id, &user).unwrap();

        let loaded: Option<User> = get(tx.as_ref(), &USERS, &user.user_id).unwrap();
        assert_eq!(loaded, Some(user.clone()));

        delete(tx.as_mut(), &USERS, &user.user_id).unwrap();
        let gone: Option<User> = get(tx.as_ref(), &USERS, &user.user_id).unwrap();
        assert!(gone.is_none());
    }

    #[tokio::test]
    async fn test_scan_returns_all_entities() {
        let backend = MemoryBackend::new();
        let mut tx = backend.begin().await.unwrap();

        for (id, name) in [("u_1", "alice"), ("u_2", "bob")] {
            let user = sample_user(id, name);
            put(tx.as_mut(), &USERS, &user.user_id, &user).unwrap();
        }

        let users: Vec<User> = scan(tx.as_ref(), &USERS).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name.as_str(), "alice");
        assert_eq!(users[1].name.as_str(), "bob");
    }
}
