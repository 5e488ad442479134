//! Backend and transaction traits.

use async_trait::async_trait;
use plumeria_commons::ApiError;
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// A named keyspace within the store ("users", "tags", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition(&'static str);

impl Partition {
    /// Creates a partition handle for a keyspace name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the keyspace name.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// One atomic unit of storage work.
///
/// All reads observe the state as of `begin` plus this transaction's own
/// writes. `commit` publishes every write atomically; dropping the
/// transaction without committing discards them all.
pub trait StoreTransaction: Send {
    /// Reads a value by key.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Writes a value under a key.
    fn put(&mut self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes a key. Deleting an absent key is a no-op.
    fn delete(&mut self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Returns every (key, value) pair in the partition, in key order.
    fn scan_all(&self, partition: &Partition) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Atomically publishes all writes performed in this transaction.
    fn commit(self: Box<Self>) -> Result<()>;
}

/// Hands out transactions over some storage engine.
///
/// Implementations must make concurrent transactions serializable: two
/// racing writers may block one another, but the loser always observes a
/// consistent post-commit state, never a torn one.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Opens a new transaction. May wait for a concurrent writer.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>>;
}
