//! Storage seam for Plumeria.
//!
//! The job layer treats persistence as an external collaborator: a
//! `StorageBackend` hands out `StoreTransaction`s, every mutation a job
//! performs goes through exactly one transaction, and the transaction
//! either commits as a whole or leaves no trace. Transaction isolation is
//! the sole concurrency-correctness mechanism; the dispatcher adds no
//! locking of its own.
//!
//! ## Architecture
//!
//! ```text
//! entity helpers        ← typed get/put/scan over StorageKey + serde
//!     ↓
//! StoreTransaction      ← atomic unit of K/V mutations (this crate)
//!     ↓
//! StorageBackend        ← transaction factory (memory, or a real store)
//! ```

pub mod entity;
pub mod memory;
pub mod sequences;
pub mod storage_trait;

pub use memory::MemoryBackend;
pub use storage_trait::{Partition, StorageBackend, StorageError, StoreTransaction};
