//! Monotonic sequence counters.
//!
//! Identifier allocation reads and bumps a counter inside the caller's
//! transaction, so an aborted job never burns an identifier that a later
//! scan would miss.

use crate::storage_trait::{Partition, Result, StorageError, StoreTransaction};

/// Partition holding all sequence counters.
pub const SEQUENCES: Partition = Partition::new("sequences");

/// Bumps and returns the next value of the named sequence (1-based).
pub fn next(tx: &mut dyn StoreTransaction, name: &str) -> Result<u64> {
    let key = name.as_bytes();
    let current = match tx.get(&SEQUENCES, key)? {
        Some(bytes) => {
            let raw: [u8; 8] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| StorageError::Serialization(format!("bad counter '{}'", name)))?;
            u64::from_be_bytes(raw)
        }
        None => 0,
    };
    let next = current + 1;
    tx.put(&SEQUENCES, key, &next.to_be_bytes())?;
    Ok(next)
}
