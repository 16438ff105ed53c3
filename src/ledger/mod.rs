//! Fragment ledger for condense-rs.
//!
//! Provides durable per-user fragment storage using `SQLite`. The ledger
//! is the sole owner of stored fragments; callers interact through the
//! [`Ledger`] trait.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use sqlite::SqliteLedger;
pub use traits::{Ledger, LedgerStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".condense/sessions.db";
