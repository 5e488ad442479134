//! Audit log provider.
//!
//! Append-only: entries are written by the dispatcher in the same
//! transaction as the job's mutations, so a rolled-back job leaves no
//! audit trace. Ids are zero-padded so key order is append order.

use crate::partitions::AUDIT_LOG;
use plumeria_commons::{ApiResult, AuditLogEntry, AuditLogId};
use plumeria_store::{entity, sequences, StoreTransaction};

/// Model operations on the audit log.
pub struct AuditLogsProvider;

impl AuditLogsProvider {
    /// Allocates the next audit entry id within the transaction.
    pub fn next_id(tx: &mut dyn StoreTransaction) -> ApiResult<AuditLogId> {
        let n = sequences::next(tx, "audit_log")?;
        Ok(AuditLogId::new(format!("audit_{:010}", n)))
    }

    /// Appends an entry.
    pub fn append(tx: &mut dyn StoreTransaction, entry: &AuditLogEntry) -> ApiResult<()> {
        entity::put(tx, &AUDIT_LOG, &entry.audit_id, entry)?;
        Ok(())
    }

    /// Returns every entry in append order.
    pub fn scan_all(tx: &dyn StoreTransaction) -> ApiResult<Vec<AuditLogEntry>> {
        Ok(entity::scan(tx, &AUDIT_LOG)?)
    }

    /// Number of persisted entries.
    pub fn count(tx: &dyn StoreTransaction) -> ApiResult<usize> {
        Ok(tx.scan_all(&AUDIT_LOG)?.len())
    }
}
