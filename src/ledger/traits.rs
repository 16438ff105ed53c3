//! Ledger trait definition.
//!
//! Defines the interface for durable fragment storage, enabling pluggable
//! storage backends and stub ledgers in tests.

use crate::core::UserId;
use crate::error::Result;
use serde::Serialize;

/// Trait for durable per-user fragment storage.
///
/// Implementations must be `Send + Sync`: the ledger handle is shared
/// process-wide and accessed from concurrent message handlers. Every
/// operation is atomic with respect to other operations on the same user:
/// a `clear` interleaved with an `append` either keeps the fragment or
/// removes it, never a partial row.
pub trait Ledger: Send + Sync {
    /// Appends a fragment for a user.
    ///
    /// The fragment receives the next insertion sequence number and is
    /// durable once this call returns: it is visible to subsequent reads,
    /// including after a process restart. Empty text is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; data is never silently dropped.
    fn append(&self, user_id: UserId, text: &str) -> Result<()>;

    /// Reads all fragment texts for a user, in insertion order.
    ///
    /// Reflects all appends committed before the call began. Returns an
    /// empty sequence for a user with no fragments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn read_all(&self, user_id: UserId) -> Result<Vec<String>>;

    /// Checks whether at least one fragment is stored for a user.
    ///
    /// Consistent with [`Ledger::read_all`] at the same point in time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn exists(&self, user_id: UserId) -> Result<bool>;

    /// Deletes all fragments for a user.
    ///
    /// Idempotent: clearing a user with no fragments is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    fn clear(&self, user_id: UserId) -> Result<()>;

    /// Releases the underlying storage handle.
    ///
    /// Idempotent. Operations after shutdown fail with
    /// [`crate::error::StorageError::Closed`]. Dropping the ledger also
    /// releases the handle, covering abnormal exit paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle cannot be released cleanly.
    fn shutdown(&self) -> Result<()>;

    /// Gets ledger statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<LedgerStats>;
}

/// Ledger statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerStats {
    /// Number of distinct users with stored fragments.
    pub user_count: usize,
    /// Total number of stored fragments.
    pub fragment_count: usize,
    /// Total size of stored fragment text in bytes.
    pub total_text_size: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
