//! In-memory storage backend.
//!
//! Serves the tests and embedders that do not attach a durable store.
//! `begin` takes an owned guard on the whole state and snapshots it, so
//! transactions are fully serializable: writers queue behind one another
//! and a rolled-back transaction leaves the shared state untouched.

use crate::storage_trait::{Partition, Result, StorageBackend, StoreTransaction};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

type PartitionData = BTreeMap<Vec<u8>, Vec<u8>>;
type StoreData = HashMap<&'static str, PartitionData>;

/// In-memory transactional backend.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<StoreData>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend").finish()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction { guard, working }))
    }
}

/// Snapshot transaction over the shared state.
struct MemoryTransaction {
    /// Held for the transaction's lifetime; serializes writers.
    guard: OwnedMutexGuard<StoreData>,
    /// Private copy all reads and writes go through.
    working: StoreData,
}

impl StoreTransaction for MemoryTransaction {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self
            .working
            .get(partition.name())
            .and_then(|data| data.get(key).cloned()))
    }

    fn put(&mut self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        self.working
            .entry(partition.name())
            .or_default()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, partition: &Partition, key: &[u8]) -> Result<()> {
        if let Some(data) = self.working.get_mut(partition.name()) {
            data.remove(key);
        }
        Ok(())
    }

    fn scan_all(&self, partition: &Partition) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(self
            .working
            .get(partition.name())
            .map(|data| {
                data.iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
